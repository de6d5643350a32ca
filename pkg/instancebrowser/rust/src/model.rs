// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Wire types for the instances API.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// One row of `GET /instances`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InstanceSummary {
    #[serde(rename = "InstanceID")]
    pub id: String,
    #[serde(rename = "InstanceType")]
    pub instance_type: String,
    #[serde(rename = "Region")]
    pub region: String,
}

/// Body of `GET /instances/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InstanceDetail {
    #[serde(rename = "InstanceID")]
    pub id: String,
    #[serde(rename = "CPU", default)]
    pub cpu: Option<f64>,
    #[serde(rename = "GraphData", default)]
    pub graph_data: GraphData,
}

impl InstanceDetail {
    /// Series handed to the chart. An empty `GraphData` yields `None`, which
    /// the chart renders as its no-data placeholder.
    pub fn series(&self) -> Option<Vec<SeriesPoint>> {
        if self.graph_data.is_empty() {
            None
        } else {
            Some(self.graph_data.points().to_vec())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPoint {
    pub timestamp: String,
    pub value: f64,
}

/// Time-keyed metric values, kept in the order the server wrote them.
///
/// Decoded straight from the JSON object into a sequence so that key `i`
/// always travels with value `i`. `null` decodes as empty. A repeated key
/// keeps the position of its first occurrence and the value of its last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphData(Vec<SeriesPoint>);

impl GraphData {
    pub fn points(&self) -> &[SeriesPoint] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<SeriesPoint>> for GraphData {
    fn from(points: Vec<SeriesPoint>) -> Self {
        GraphData(points)
    }
}

struct GraphDataVisitor;

impl<'de> Visitor<'de> for GraphDataVisitor {
    type Value = GraphData;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of timestamp to number, or null")
    }

    fn visit_unit<E>(self) -> Result<GraphData, E>
    where
        E: serde::de::Error,
    {
        Ok(GraphData::default())
    }

    fn visit_none<E>(self) -> Result<GraphData, E>
    where
        E: serde::de::Error,
    {
        Ok(GraphData::default())
    }

    fn visit_map<A>(self, mut map: A) -> Result<GraphData, A::Error>
    where
        A: MapAccess<'de>,
    {
        let capacity = map.size_hint().unwrap_or(0);
        let mut points: Vec<SeriesPoint> = Vec::with_capacity(capacity);
        let mut positions: HashMap<String, usize> = HashMap::with_capacity(capacity);
        while let Some((timestamp, value)) = map.next_entry::<String, f64>()? {
            match positions.entry(timestamp) {
                Entry::Occupied(slot) => {
                    if let Some(point) = points.get_mut(*slot.get()) {
                        point.value = value;
                    }
                }
                Entry::Vacant(slot) => {
                    points.push(SeriesPoint {
                        timestamp: slot.key().clone(),
                        value,
                    });
                    slot.insert(points.len() - 1);
                }
            }
        }
        Ok(GraphData(points))
    }
}

impl<'de> Deserialize<'de> for GraphData {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(GraphDataVisitor)
    }
}
