//! Lecture du document JSON poussé par l'application
//!
//! The document is fully validated into a new [`LibrarySnapshot`] before
//! anything is published, so a rejected document leaves no trace.

use crate::category::Category;
use crate::error::{ItemLocation, LibraryError, Result};
use crate::labels::LibraryLabels;
use crate::node::MediaNode;
use crate::snapshot::{EntityCatalog, LibrarySnapshot};
use serde_json::{Map, Value};

/// Builds the snapshot that results from applying `json` on top of `base`.
///
/// Categories present in the document replace the corresponding section of
/// `base` wholesale; absent (or `null`) categories are carried over.
pub(crate) fn parse_library(
    json: &str,
    labels: &LibraryLabels,
    base: &LibrarySnapshot,
) -> Result<LibrarySnapshot> {
    let document: Value = serde_json::from_str(json)?;
    let Value::Object(fields) = document else {
        return Err(LibraryError::NotAnObject);
    };

    let mut next = base.clone();
    for category in Category::ALL {
        let entries = match fields.get(category.json_field()) {
            None | Some(Value::Null) => continue,
            Some(Value::Array(entries)) => entries,
            Some(_) => return Err(LibraryError::InvalidCategory { category }),
        };

        match category {
            Category::Recent => {
                let tracks = entries
                    .iter()
                    .enumerate()
                    .map(|(index, entry)| parse_track(entry, ItemLocation::entry(category, index)))
                    .collect::<Result<Vec<_>>>()?;
                next.set_recent(tracks);
            }
            Category::Playlists | Category::Albums | Category::Artists => {
                next.set_catalog(category, parse_entities(category, entries, labels)?);
            }
        }
    }

    Ok(next)
}

/// Parses the entities of one category, synthesizing the shuffle entries.
fn parse_entities(
    category: Category,
    entries: &[Value],
    labels: &LibraryLabels,
) -> Result<EntityCatalog> {
    let mut catalog = EntityCatalog::default();

    for (index, entry) in entries.iter().enumerate() {
        let location = ItemLocation::entry(category, index);
        let fields = Fields::of(entry, location)?;

        let raw_id = fields.required("id")?;
        let title = fields.required("title")?;
        let subtitle = fields.optional("subtitle")?;
        let artwork = fields.artwork()?;

        let tracks = match fields.get("items") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(track, item)| parse_track(item, location.nested(track)))
                .collect::<Result<Vec<_>>>()?,
            Some(_) => {
                return Err(LibraryError::InvalidField {
                    location,
                    field: "items",
                })
            }
        };

        let entity_id = category.entity_id(&raw_id);
        let artwork = if artwork.is_empty() { None } else { Some(artwork) };

        // Le compteur affiché ne compte jamais l'entrée aléatoire
        let subtitle = if subtitle.is_empty() {
            labels.track_count(tracks.len())
        } else {
            subtitle
        };

        let mut children = Vec::with_capacity(tracks.len() + 1);
        children.push(MediaNode::shuffle(&entity_id, artwork.clone(), labels));
        children.extend(tracks);

        let row = MediaNode::entity(entity_id, title, subtitle, artwork);
        catalog.insert(raw_id, row, children);
    }

    Ok(catalog)
}

fn parse_track(entry: &Value, location: ItemLocation) -> Result<MediaNode> {
    let fields = Fields::of(entry, location)?;
    Ok(MediaNode::track(
        fields.required("id")?,
        fields.required("title")?,
        fields.optional("artist")?,
        fields.optional("album")?,
        fields.artwork()?,
    ))
}

/// Accès typé aux champs d'un objet du document
struct Fields<'a> {
    object: &'a Map<String, Value>,
    location: ItemLocation,
}

impl<'a> Fields<'a> {
    fn of(value: &'a Value, location: ItemLocation) -> Result<Self> {
        match value {
            Value::Object(object) => Ok(Self { object, location }),
            _ => Err(LibraryError::InvalidItem { location }),
        }
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.object.get(field)
    }

    /// Strings are taken as-is and numbers are rendered; `null` counts as absent.
    fn scalar(&self, field: &'static str) -> Result<Option<String>> {
        match self.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(_) => Err(LibraryError::InvalidField {
                location: self.location,
                field,
            }),
        }
    }

    fn required(&self, field: &'static str) -> Result<String> {
        self.scalar(field)?.ok_or_else(|| LibraryError::MissingField {
            location: self.location,
            field,
        })
    }

    fn optional(&self, field: &'static str) -> Result<String> {
        Ok(self.scalar(field)?.unwrap_or_default())
    }

    /// `artworkRef`, falling back to the legacy `artworkUrl` field.
    fn artwork(&self) -> Result<String> {
        match self.scalar("artworkRef")? {
            Some(reference) if !reference.is_empty() => Ok(reference),
            _ => self.optional("artworkUrl"),
        }
    }
}
