use anyhow::{Context as _, Result};
use coligo::prelude::*;

#[derive(Model, Clone, Debug)]
#[model(table = "products", primary_key = "id", overrides = Product::overrides)]
struct Product {
    attributes: Attributes,
    _label: Value,
}

impl Product {
    fn new(attributes: Attributes) -> Self {
        Self {
            attributes,
            _label: Value::Null,
        }
    }

    fn overrides(accessors: Accessors<Self>) -> Accessors<Self> {
        // prices are stored in cents
        accessors
            .getter("price", |product| {
                let price = product.attributes().field("price").and_then(Value::as_f64);
                Ok(price
                    .map(|price| Value::from((price * 100.0).round() as i64))
                    .unwrap_or(Value::Null))
            })
            .setter("price", |product, value| {
                let price = value
                    .as_f64()
                    .map(|cents| Value::from(cents / 100.0))
                    .unwrap_or(value);
                product.attributes_mut().set_field("price", price)
            })
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::from_env()
        .unwrap_or_else(|_| Config::new("sqlite::memory:").max_connections(1));

    let context = Context::<Database>::new();
    let conn = context.init(&config).context("failed to connect")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            price INTEGER,
            stock INTEGER DEFAULT 0
        )",
        &[],
    )?;

    for (name, price, stock) in [("pen", 1.5, 10), ("ink", 4.25, 0), ("pad", 2.0, 3)] {
        let product = Product::new(fields!(
            id = Value::Null,
            name = name,
            price = price,
            stock = stock
        ));
        let id = product.create(&*conn)?;
        log::info!("created {name} with id {id:?}");
    }

    let mut pen = Product::new(fields!(
        id = 1,
        name = Value::Null,
        price = Value::Null,
        stock = Value::Null
    ));
    pen.retrieve(&*conn)?;
    pen.set("label", "bestseller")?;
    println!("{pen:?}, price {}", pen.get("price")?);

    let query = SelectQuery::new()
        .select(["name", "price"])
        .from("products")
        .where_not("stock", 0)
        .or_where("name", ["ink"])?;
    println!("{query:#}");

    for row in query.execute(&*conn)? {
        println!("{}", format_row(&row));
    }

    context.teardown();
    Ok(())
}

fn format_row(row: &Row) -> String {
    row.iter()
        .map(|(column, value)| format!("{column}={value}"))
        .collect::<Vec<_>>()
        .join(" ")
}
