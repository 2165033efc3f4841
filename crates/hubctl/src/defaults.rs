use camino::{Utf8Path, Utf8PathBuf};

pub(crate) const CONFIG_DIR_NAME: &str = "hubctl";

pub(crate) const CONFIG_FILE_NAME: &str = "hosts.toml";

pub fn default_config_dir() -> Utf8PathBuf {
    if let Some(dir) = dirs::config_dir() {
        if let Some(dir) = Utf8Path::from_path(&dir) {
            return dir.join(CONFIG_DIR_NAME);
        }
    }

    Utf8PathBuf::from(CONFIG_DIR_NAME)
}
