//! Admin-defined specification options, materials and size charts.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::wire::{first_label, record_id, NamedRecord};
use crate::error::CommerceError;
use crate::ids::{MaterialId, SizeChartId, SpecificationId};

/// The specification slots of the product form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SpecificationKind {
    NetWeight,
    Fit,
    SleevesType,
    Length,
    Occasion,
    InnerLining,
    Material,
    Pocket,
    Neck,
    Other,
}

impl SpecificationKind {
    /// All kinds, in form order.
    pub const ALL: [SpecificationKind; 10] = [
        SpecificationKind::NetWeight,
        SpecificationKind::Fit,
        SpecificationKind::SleevesType,
        SpecificationKind::Length,
        SpecificationKind::Occasion,
        SpecificationKind::InnerLining,
        SpecificationKind::Material,
        SpecificationKind::Pocket,
        SpecificationKind::Neck,
        SpecificationKind::Other,
    ];

    /// Type key used by the specification endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecificationKind::NetWeight => "netWeight",
            SpecificationKind::Fit => "fit",
            SpecificationKind::SleevesType => "sleevesType",
            SpecificationKind::Length => "length",
            SpecificationKind::Occasion => "occasion",
            SpecificationKind::InnerLining => "innerLining",
            SpecificationKind::Material => "material",
            SpecificationKind::Pocket => "pocket",
            SpecificationKind::Neck => "neck",
            SpecificationKind::Other => "other",
        }
    }

    /// Key used inside `features[...]` when creating a product.
    ///
    /// The backend stores length under a capitalised key.
    pub fn feature_key(&self) -> &'static str {
        match self {
            SpecificationKind::Length => "Length",
            other => other.as_str(),
        }
    }

    /// Parse a specification type key.
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_str() == s)
    }

    /// Parse a specification type key, failing on unknown kinds.
    pub fn parse(s: &str) -> Result<Self, CommerceError> {
        Self::from_str(s).ok_or_else(|| CommerceError::UnknownSpecification(s.to_string()))
    }
}

impl fmt::Display for SpecificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A specification row as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "NamedRecord<SpecificationId>")]
pub struct SpecificationRecord {
    #[serde(rename = "_id")]
    pub id: SpecificationId,
    pub name: String,
    /// Raw type key; unknown keys are dropped when grouping.
    #[serde(rename = "type")]
    pub kind: String,
}

impl TryFrom<NamedRecord<SpecificationId>> for SpecificationRecord {
    type Error = CommerceError;

    fn try_from(record: NamedRecord<SpecificationId>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record_id(record.mongo_id, record.id, "specification")?,
            name: record.name.unwrap_or_default(),
            kind: record.kind.unwrap_or_default(),
        })
    }
}

/// A selectable option for one specification slot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpecificationOption {
    pub id: SpecificationId,
    pub name: String,
}

/// Organise specification records into per-kind option lists.
///
/// Every kind gets an entry, possibly empty; records with an unknown type
/// are ignored.
pub fn group_specifications(
    records: Vec<SpecificationRecord>,
) -> BTreeMap<SpecificationKind, Vec<SpecificationOption>> {
    let mut grouped: BTreeMap<SpecificationKind, Vec<SpecificationOption>> = SpecificationKind::ALL
        .iter()
        .map(|k| (*k, Vec::new()))
        .collect();

    for record in records {
        match SpecificationKind::from_str(&record.kind) {
            Some(kind) => grouped.entry(kind).or_default().push(SpecificationOption {
                id: record.id,
                name: record.name,
            }),
            None => tracing::debug!(kind = %record.kind, "ignoring unknown specification type"),
        }
    }

    grouped
}

/// A material entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "NamedRecord<MaterialId>")]
pub struct Material {
    #[serde(rename = "_id")]
    pub id: MaterialId,
    pub name: String,
}

impl TryFrom<NamedRecord<MaterialId>> for Material {
    type Error = CommerceError;

    fn try_from(record: NamedRecord<MaterialId>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record_id(record.mongo_id, record.id, "material")?,
            name: record.name.unwrap_or_default(),
        })
    }
}

/// A size chart that can be attached to a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "NamedRecord<SizeChartId>")]
pub struct SizeChart {
    #[serde(rename = "_id")]
    pub id: SizeChartId,
    pub title: String,
}

impl TryFrom<NamedRecord<SizeChartId>> for SizeChart {
    type Error = CommerceError;

    fn try_from(record: NamedRecord<SizeChartId>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record_id(record.mongo_id, record.id, "size chart")?,
            title: first_label([record.title, record.name]).unwrap_or_default(),
        })
    }
}
