use djset_core::Config;
use djset_core::engine::single_scope_engine;
use std::path::PathBuf;
use tracing::info;

pub fn run(path: PathBuf, settings_files: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    info!("Scanning settings files under: {}", path.display());

    let config = Config { settings_files };
    let (engine, scope, _signals) = single_scope_engine(path, config);

    match engine.names(&scope) {
        Some(names) => {
            info!("Discovered {} settings name(s)", names.len());
            for name in names.iter() {
                println!("{}", name);
            }
        }
        None => info!("No settings names discovered"),
    }

    Ok(())
}
