use cart_store::core::ConfigProvider;
use cart_store::utils::{logger, validation::Validate};
use cart_store::{
    Cart, CartCommand, CartStore, CliConfig, ConsoleNotificationSink, FileKeyValueStore,
    NotifyingCart, StoreOptions, StorefrontApi, TomlConfig,
};
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入配置：有指定 TOML 檔案時以檔案為準
    let settings: Box<dyn ConfigProvider> = match &cli.config {
        Some(path) => {
            let config = match TomlConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    std::process::exit(1);
                }
            };
            if let Err(e) = config.validate() {
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
            Box::new(config)
        }
        None => {
            if let Err(e) = cli.validate() {
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
            Box::new(cli.clone())
        }
    };

    // 初始化日誌（格式來自配置）
    logger::init_logger(cli.verbose, settings.log_format());
    if let Some(path) = &cli.config {
        tracing::info!("📁 Loaded configuration from: {}", path);
    }
    tracing::debug!("CLI config: {:?}", cli);

    // 建立協作者與購物車
    let api = StorefrontApi::from_config(settings.as_ref());
    let storage = FileKeyValueStore::new(settings.storage_path());
    let options = StoreOptions::from_config(settings.as_ref());
    let store = Arc::new(CartStore::open(api.clone(), api, storage, options));
    let cart = NotifyingCart::new(store, ConsoleNotificationSink);

    match cli.command {
        CartCommand::Show => {}
        CartCommand::Add { product_id } => cart.add_product(product_id).await,
        CartCommand::Remove { product_id } => cart.remove_product(product_id).await,
        CartCommand::Update { product_id, amount } => {
            cart.update_product_amount(product_id, amount).await
        }
    }

    print_cart(&cart.cart());
    Ok(())
}

fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("🛒 Cart is empty");
        return;
    }

    println!("🛒 Cart ({} items)", cart.total_items());
    for line in cart.lines() {
        println!(
            "  #{:<6} {:<32} {:>4} x {:>10.2} = {:>10.2}",
            line.product_id,
            line.title,
            line.amount,
            line.price,
            line.price * f64::from(line.amount)
        );
    }
    println!("  Subtotal: {:.2}", cart.subtotal());
}
