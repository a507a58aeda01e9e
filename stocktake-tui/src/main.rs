mod app;
mod pages;

use std::fs::File;
use std::sync::Arc;
use std::time::Duration;

use simplelog::{Config, LevelFilter, WriteLogger};
use stocktake_lib::{MemoryStore, Product, ScriptedScanner, Warehouse};

use app::App;

#[tokio::main]
async fn main() {
    let log_file = File::create("stocktake-tui.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let store = Arc::new(seeded_store().await);
    let scanner = Arc::new(
        ScriptedScanner::new(["8690000000017", "8690000000031", "8690000000048"])
            .with_delay(Duration::from_millis(600)),
    );

    if let Err(e) = App::new(store, scanner, "demo").run().await {
        eprintln!("Error: {}", e);
    }
}

/// Demo inventory so the app has something to count.
async fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new().with_latency(Duration::from_millis(250));

    store
        .add_warehouse(Warehouse {
            id: 1,
            name: "Central Warehouse".to_string(),
        })
        .await;

    let products = [
        Product::new("P-100", "Granulated Sugar 1kg")
            .barcode("8690000000017")
            .unit("pack", 10.0),
        Product::new("P-101", "Sunflower Oil 5L").barcode("8690000000024"),
        Product::new("P-102", "Espresso Beans 250g")
            .barcode("8690000000031")
            .unit("case", 12.0),
        Product::new("P-103", "Sparkling Water 330ml")
            .barcode("8690000000048")
            .unit("pack", 6.0)
            .unit("pallet", 144.0),
        Product::new("P-104", "Paper Towels 6pk").barcode("8690000000055"),
    ];
    for product in products {
        store.add_product(product).await;
    }

    store
}
