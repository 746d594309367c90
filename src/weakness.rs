//! Damage-multiplier aggregation over a Pokemon's type relations.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Defensive damage relations of one element type.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TypeRelations {
    pub name: String,
    pub double_from: Vec<String>,
    pub half_from: Vec<String>,
    pub no_from: Vec<String>,
}

/// Fold the relations of each of a Pokemon's types, in declared order,
/// into one multiplier per opposing type. Accumulation is sequential and
/// multiplicative: an unseen type starts at 1, `double_from` doubles it,
/// `half_from` halves it, `no_from` overrides it to exactly 0. A zero
/// stays zero through later doublings; a later immunity zeroes any
/// earlier product.
pub fn accumulate(relations: &[TypeRelations]) -> HashMap<String, f32> {
    let mut multipliers: HashMap<String, f32> = HashMap::new();
    for relation in relations {
        for name in &relation.double_from {
            *multipliers.entry(name.clone()).or_insert(1.0) *= 2.0;
        }
        for name in &relation.half_from {
            *multipliers.entry(name.clone()).or_insert(1.0) *= 0.5;
        }
        for name in &relation.no_from {
            multipliers.insert(name.clone(), 0.0);
        }
    }
    multipliers
}

/// Opposing types whose accumulated multiplier reaches 2, sorted so the
/// badge row renders deterministically.
pub fn weaknesses(relations: &[TypeRelations]) -> Vec<String> {
    let mut weak: Vec<String> = accumulate(relations)
        .into_iter()
        .filter(|(_, multiplier)| *multiplier >= 2.0)
        .map(|(name, _)| name)
        .collect();
    weak.sort();
    weak
}
