use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillConfig {
    /// Render problem statements and solution steps as LaTeX instead of plain text.
    pub latex: bool,
    /// Emit replies as JSON lines instead of formatted text.
    pub json: bool,
    /// Number of input lines kept in the readline history file.
    pub history_size: usize,
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            latex: false,
            json: false,
            history_size: 100,
        }
    }
}

impl DrillConfig {
    pub fn load() -> Self {
        let path = Path::new("drill_config.toml");
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => println!("Error parsing config file: {}. Using defaults.", e),
                },
                Err(e) => println!("Error reading config file: {}. Using defaults.", e),
            }
        }
        Self::default()
    }

    pub fn save(&self) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
        let mut file = fs::File::create("drill_config.toml")?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }

    pub fn restore() -> Self {
        let config = Self::default();
        let _ = config.save(); // Overwrite file with defaults
        config
    }
}
