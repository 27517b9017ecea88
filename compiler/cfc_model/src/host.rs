//! Host-language side files (`parcel_<lang>.json`).
//!
//! ```text
//! {
//!     "host_module": "Animal::Bindings",
//!     "classes": {
//!         "Animal::Dog": { "bind_constructors": true }
//!     }
//! }
//! ```
//!
//! The module name is stored on the parcel; each class entry is attached
//! to the named class of that parcel.

use std::fs;
use std::io;

use crate::json::{self, JsonValue};
use crate::parcel::wrong_type;
use crate::{ModelContext, ModelError, ParcelId};

impl ModelContext {
    /// Merge host data from `text` into `parcel_id`. `path` is used in
    /// error messages.
    pub fn apply_host_data(
        &mut self,
        parcel_id: ParcelId,
        text: &str,
        path: &str,
    ) -> Result<(), ModelError> {
        let parsed = json::parse(text).ok_or_else(|| ModelError::InvalidJson {
            path: path.to_string(),
        })?;
        let JsonValue::Hash(data) = parsed else {
            return Err(ModelError::NotAHash {
                path: path.to_string(),
            });
        };

        for (key, value) in data.iter() {
            match (key, value) {
                ("host_module", JsonValue::String(module)) => {
                    self.parcels[parcel_id.index()].host_module = Some(module.clone());
                }
                ("classes", JsonValue::Hash(classes)) => {
                    for (class_name, class_data) in classes.iter() {
                        let class_id = self.fetch_class(parcel_id, class_name).ok_or_else(|| {
                            ModelError::UnknownHostClass {
                                class: class_name.to_string(),
                                path: path.to_string(),
                            }
                        })?;
                        let host_data = match class_data {
                            JsonValue::Hash(hash) => hash.clone(),
                            JsonValue::Null => Default::default(),
                            _ => {
                                return Err(ModelError::WrongType {
                                    key: class_name.to_string(),
                                    expected: "hash",
                                    path: path.to_string(),
                                })
                            }
                        };
                        self.classes[class_id.index()].host_data = Some(host_data);
                    }
                }
                ("host_module", _) => return Err(wrong_type(key, "string", path)),
                ("classes", _) => return Err(wrong_type(key, "hash", path)),
                _ => {
                    return Err(ModelError::UnknownKey {
                        key: key.to_string(),
                        path: path.to_string(),
                    })
                }
            }
        }
        Ok(())
    }

    /// Load `parcel_<host_lang>.json` from the directory of the parcel's
    /// `.cfp` file, if both exist. Returns whether a file was applied.
    pub fn read_host_data_json(
        &mut self,
        parcel_id: ParcelId,
        host_lang: &str,
    ) -> Result<bool, ModelError> {
        let Some(dir) = self.parcel(parcel_id).source().and_then(|src| src.parent()) else {
            return Ok(false);
        };
        let path = dir.join(format!("parcel_{host_lang}.json"));
        let shown = path.display().to_string();

        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(ModelError::io(shown, e)),
        };
        tracing::debug!(path = %shown, "reading host data");
        self.apply_host_data(parcel_id, &text, &shown)?;
        Ok(true)
    }
}
