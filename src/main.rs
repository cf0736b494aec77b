use keepsake::config::persistence::PreferenceStore;
use keepsake::config::GiftConfig;
use keepsake::store::AppStore;
use keepsake::{app::App, logging, Result};
use tracing::error;

#[tokio::main]
async fn main() -> Result<()> {
    let config = GiftConfig::load()?;
    if let Err(e) = logging::init(&config.ui.log_level) {
        eprintln!("Logging disabled: {}", e);
    }

    let store = match PreferenceStore::new() {
        Ok(preferences) => AppStore::open(preferences, &config.recipient.default_name),
        Err(e) => {
            error!(error = %e, "no preference storage, settings will not be kept");
            AppStore::in_memory(&config.recipient.default_name)
        }
    };

    let mut app = App::new(config, store)?;
    app.init()?;
    let result = app.run().await;
    app.restore()?;

    if let Err(e) = &result {
        error!(error = %e, "application error");
        eprintln!("Application error: {}", e);
    }
    result
}
