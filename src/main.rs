use azure_inventory_collector::azure::AzCliConnector;
use azure_inventory_collector::config::Settings;
use azure_inventory_collector::{collect_all, output, LogObserver};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    log4rs::init_file("log4rs.yml", Default::default())?;
    dotenv::dotenv().ok();
    log::info!("#Start main()");

    let settings = Settings::from_env()?;
    let connector = AzCliConnector::new(&settings.subscription_id);

    let collection = collect_all(&settings.params(), &settings.families, &connector, &LogObserver)?;

    output::print_summary(&collection);
    output::write_json(std::io::stdout().lock(), &collection)?;

    Ok(())
}
