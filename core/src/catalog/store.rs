//! File-backed catalog store
//!
//! The backing document is the only source of truth. Every read goes back to
//! disk so operators can edit the file while the service runs. Writes replace
//! the whole document through a temporary file and a rename, so readers see
//! either the old or the new catalog, never a partial one. Concurrent saves
//! are not coordinated: the last rename to land wins.

use crate::catalog::{PluginRecord, decode_document, default_plugins, encode_document};
use crate::error::{MarketError, MarketResult};
use std::collections::HashSet;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Produces the catalog used when no backing document exists.
pub type SeedFn = Arc<dyn Fn() -> Vec<PluginRecord> + Send + Sync>;

pub struct CatalogStore {
	path: PathBuf,
	seed: SeedFn,
}

impl CatalogStore {
	/// Create a store backed by the document at `path`, seeded with the default plugins.
	pub fn new<P: AsRef<Path>>(path: P) -> Self {
		Self::with_seed(path, Arc::new(default_plugins))
	}

	/// Create a store with a custom seed.
	pub fn with_seed<P: AsRef<Path>>(path: P, seed: SeedFn) -> Self {
		Self {
			path: path.as_ref().to_path_buf(),
			seed,
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Load the catalog, falling back to an empty list if the document is broken.
	pub fn load(&self) -> Vec<PluginRecord> {
		match self.try_load() {
			Ok(records) => records,
			Err(e) => {
				tracing::error!(
					path = %self.path.display(),
					kind = e.kind(),
					"Failed to load plugin catalog: {}",
					e
				);
				Vec::new()
			}
		}
	}

	/// Load the catalog, surfacing read and decode failures.
	///
	/// A missing document is seeded and persisted. The seed is returned even if
	/// persisting it fails.
	pub fn try_load(&self) -> MarketResult<Vec<PluginRecord>> {
		match fs::read_to_string(&self.path) {
			Ok(contents) => {
				let records = decode_document(&contents)?;
				log_duplicate_names(&records);
				Ok(records)
			}
			Err(e) if e.kind() == ErrorKind::NotFound => {
				tracing::info!(path = %self.path.display(), "No catalog document found, seeding defaults");

				let records = (self.seed)();
				// save() already logged the failure
				let _ = self.save(&records);
				Ok(records)
			}
			Err(e) if e.kind() == ErrorKind::InvalidData => Err(MarketError::StoreUnreadable(format!(
				"{} is not valid UTF-8: {}",
				self.path.display(),
				e
			))),
			Err(e) => Err(MarketError::Io(e)),
		}
	}

	/// Replace the backing document with `records`.
	pub fn save(&self, records: &[PluginRecord]) -> MarketResult<()> {
		self.write_document(records).map_err(|e| {
			tracing::error!(path = %self.path.display(), "Failed to save plugin catalog: {}", e);
			MarketError::StoreUnwritable(e.to_string())
		})
	}

	/// Find the first plugin whose name matches exactly.
	pub fn find_by_name(&self, name: &str) -> Option<PluginRecord> {
		self.load().into_iter().find(|p| p.name == name)
	}

	/// Strict variant of [`find_by_name`](Self::find_by_name).
	pub fn try_find_by_name(&self, name: &str) -> MarketResult<Option<PluginRecord>> {
		Ok(self.try_load()?.into_iter().find(|p| p.name == name))
	}

	fn write_document(&self, records: &[PluginRecord]) -> MarketResult<()> {
		let json = encode_document(records)?;

		let parent = match self.path.parent() {
			Some(p) if !p.as_os_str().is_empty() => p,
			_ => Path::new("."),
		};
		fs::create_dir_all(parent)?;

		let mut tmp = NamedTempFile::new_in(parent)?;
		tmp.write_all(json.as_bytes())?;
		tmp.as_file().sync_all()?;

		tmp.persist(&self.path).map_err(|e| MarketError::Io(e.error))?;

		tracing::debug!(path = %self.path.display(), count = records.len(), "Catalog saved");
		Ok(())
	}
}

fn log_duplicate_names(records: &[PluginRecord]) {
	let mut seen = HashSet::new();
	for record in records {
		if !seen.insert(record.name.as_str()) {
			tracing::debug!(name = %record.name, "Duplicate plugin name in catalog, lookups use the first entry");
		}
	}
}
