use std::collections::BTreeMap;
use std::fmt;

use num_bigint::BigInt;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ShareError;
use crate::numeral;
use crate::points::{PointSet, SamplePoint, ShareRecord};

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("malformed share document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("share name {0:?} is not an integer")]
    InvalidName(String),

    #[error("share {name:?} has invalid base {base:?}")]
    InvalidBase { name: String, base: String },

    #[error(transparent)]
    Share(#[from] ShareError),
}

/// The reserved metadata entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keys {
    /// Number of shares the dealer produced, if declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<usize>,
    /// Shares needed to reconstruct
    pub k: usize,
}

/// A radix written either as a JSON number or as a string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Radix {
    Number(u32),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawShare {
    pub base: Radix,
    pub value: String,
}

// A JSON share document:
//
//     {
//         "keys": { "n": 4, "k": 3 },
//         "1": { "base": "10", "value": "4" },
//         "2": { "base": "2", "value": "111" },
//         "6": { "base": "4", "value": "213" }
//     }
//
// `keys` is reserved; every other entry is a share whose name is its x
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareDocument {
    pub keys: Keys,
    #[serde(flatten, deserialize_with = "unique_shares")]
    pub shares: BTreeMap<String, RawShare>,
}

// Collect the share entries, rejecting a name that appears twice
fn unique_shares<'de, D>(deserializer: D) -> Result<BTreeMap<String, RawShare>, D::Error>
where
    D: Deserializer<'de>,
{
    struct UniqueShares;

    impl<'de> Visitor<'de> for UniqueShares {
        type Value = BTreeMap<String, RawShare>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of uniquely named shares")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut shares = BTreeMap::new();
            while let Some((name, share)) = map.next_entry::<String, RawShare>()? {
                if shares.contains_key(&name) {
                    return Err(de::Error::custom(format!("duplicate share name {:?}", name)));
                }
                shares.insert(name, share);
            }
            Ok(shares)
        }
    }

    deserializer.deserialize_map(UniqueShares)
}

impl ShareDocument {
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build a document from shares, writing each y in the paired base
    pub fn from_points<'a>(
        k: usize,
        shares: impl IntoIterator<Item = (&'a SamplePoint, u32)>,
    ) -> Result<Self, ShareError> {
        let mut entries = BTreeMap::new();
        for (point, base) in shares {
            entries.insert(
                point.x.to_string(),
                RawShare {
                    base: Radix::Text(base.to_string()),
                    value: numeral::encode(&point.y, base)?,
                },
            );
        }

        Ok(Self {
            keys: Keys {
                n: Some(entries.len()),
                k,
            },
            shares: entries,
        })
    }

    /// Declared and actual share counts, when `keys.n` disagrees with the document
    pub fn declared_mismatch(&self) -> Option<(usize, usize)> {
        match self.keys.n {
            Some(n) if n != self.shares.len() => Some((n, self.shares.len())),
            _ => None,
        }
    }

    pub fn to_records(&self) -> Result<Vec<ShareRecord>, DocumentError> {
        self.shares
            .iter()
            .map(|(name, share)| -> Result<ShareRecord, DocumentError> {
                let x: BigInt = name
                    .trim()
                    .parse()
                    .map_err(|_| DocumentError::InvalidName(name.clone()))?;

                let base = match &share.base {
                    Radix::Number(base) => *base,
                    Radix::Text(text) => text.trim().parse().map_err(|_| DocumentError::InvalidBase {
                        name: name.clone(),
                        base: text.clone(),
                    })?,
                };

                Ok(ShareRecord {
                    x,
                    base,
                    digits: share.value.clone(),
                })
            })
            .collect()
    }

    pub fn point_set(&self) -> Result<PointSet, DocumentError> {
        Ok(PointSet::build(&self.to_records()?, self.keys.k)?)
    }

    pub fn reconstruct(&self) -> Result<BigInt, DocumentError> {
        Ok(self.point_set()?.reconstruct()?)
    }
}
