use std::{ffi::OsStr, path::Path};

use anyhow::Context;
use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};
use serde_json::Value;

use crate::generator::document::OpenApiDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecFormat {
  #[default]
  Json,
  Yaml,
}

impl SpecFormat {
  #[must_use]
  pub fn from_extension(ext: &str) -> Self {
    match ext {
      "yaml" | "yml" => Self::Yaml,
      _ => Self::Json,
    }
  }
}

pub struct SpecLoader {
  file: AsyncMmapFile,
  format: SpecFormat,
}

impl SpecLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let format = path
      .extension()
      .and_then(OsStr::to_str)
      .map_or(SpecFormat::default(), SpecFormat::from_extension);

    let file = AsyncMmapFile::open(path)
      .await
      .with_context(|| format!("failed to open {}", path.display()))?;

    Ok(Self { file, format })
  }

  pub(crate) fn parse(&self) -> anyhow::Result<OpenApiDocument> {
    parse_document(self.file.as_slice(), self.format)
  }
}

pub(crate) fn parse_document(bytes: &[u8], format: SpecFormat) -> anyhow::Result<OpenApiDocument> {
  let raw: Value = match format {
    SpecFormat::Json => {
      let deserializer = &mut serde_json::Deserializer::from_slice(bytes);
      serde_path_to_error::deserialize(deserializer)
        .map_err(|err| anyhow::anyhow!("invalid JSON at '{}': {}", err.path(), err.inner()))?
    }
    SpecFormat::Yaml => {
      let deserializer = serde_yaml::Deserializer::from_slice(bytes);
      serde_path_to_error::deserialize(deserializer)
        .map_err(|err| anyhow::anyhow!("invalid YAML at '{}': {}", err.path(), err.inner()))?
    }
  };
  OpenApiDocument::from_value(raw)
}
