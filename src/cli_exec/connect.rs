use anyhow::Result;

use odectl::model::DeviceConfig;
use odectl::store::ConfigStore;

pub(crate) fn connect(url: Option<String>) -> Result<()> {
    let store = ConfigStore::open_default()?;
    match url {
        Some(base_url) => {
            let mut config = store.read_config()?;
            config.device = Some(DeviceConfig { base_url });
            store.write_config(&config)?;
            println!("Device configured");
        }
        None => match store.read_config()?.device {
            Some(device) => println!("url: {}", device.base_url),
            None => println!("No device configured"),
        },
    }
    Ok(())
}
