//! Config and starter-document scaffolding

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::config::{GlintConfig, CONFIG_FILE};

/// Write `glint.toml` (and a starter token export if none exists) into `path`
pub fn init_project(path: &Path, force: bool) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            config_path.display()
        );
    }

    let config = GlintConfig::default();
    fs::write(&config_path, config.to_toml()?)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    tracing::info!("Wrote {}", config_path.display());

    let document_path = config.document_path(path);
    if document_path.exists() {
        tracing::info!("Keeping existing {}", document_path.display());
    } else {
        fs::write(&document_path, template_document())
            .with_context(|| format!("Failed to write {}", document_path.display()))?;
        tracing::info!("Wrote {}", document_path.display());
    }

    Ok(())
}

fn template_document() -> &'static str {
    r##"[
  {
    "1. Primitives": {
      "color": {
        "white": { "$type": "color", "$value": "#ffffff" },
        "black": { "$type": "color", "$value": "#0a0a0a" },
        "blue": { "$type": "color", "$value": "#3b82f6" }
      },
      "space": {
        "1": { "$type": "number", "$value": 4 },
        "2": { "$type": "number", "$value": 8 }
      }
    }
  },
  {
    "2. Theme": {
      "radius": {
        "md": { "$type": "number", "$value": "{space.2}" }
      },
      "padding": {
        "control": { "$type": "string", "$value": "{space.1}px {space.2}px" }
      }
    }
  },
  {
    "3. Modes": {
      "Light": {
        "background": { "$type": "color", "$value": "{color.white}" },
        "foreground": { "$type": "color", "$value": "{color.black}" },
        "accent": { "$type": "color", "$value": "{color.blue}" }
      },
      "Dark": {
        "background": { "$type": "color", "$value": "{color.black}" },
        "foreground": { "$type": "color", "$value": "{color.white}" },
        "accent": { "$type": "color", "$value": "{color.blue}" }
      }
    }
  }
]
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_tokens::{TokenDocument, TokenValue};

    #[test]
    fn template_document_resolves() {
        let doc = TokenDocument::from_json_str(template_document()).unwrap();
        let tokens = GlintConfig::default().assembler().assemble(&doc).unwrap();

        assert_eq!(
            tokens.lookup("theme", "padding.control"),
            Some(&TokenValue::from("4px 8px"))
        );
        assert_eq!(
            tokens.lookup("Dark", "background"),
            Some(&TokenValue::from("#0a0a0a"))
        );
    }
}
