//! Pipeline data structures as delivered by the backend API.
//!
//! Only the fields the scheme needs are modelled; extra keys in the payload
//! are ignored by serde.

use serde::Deserialize;

/// A named corridor between two cities made of ordered pipe segments.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Pipeline {
	/// Display title in the form "CityA - CityB".
	pub title: String,
	#[serde(default)]
	pub order: Option<i64>,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub pipes: Vec<Pipe>,
	#[serde(default)]
	pub nodes: Vec<Node>,
}

impl Pipeline {
	/// Distance covered by the pipes, from the lowest start to the highest end.
	pub fn total_length(&self) -> f64 {
		if self.pipes.is_empty() {
			return 0.0;
		}
		let min = self
			.pipes
			.iter()
			.map(|p| p.start_point)
			.fold(f64::INFINITY, f64::min);
		let max = self
			.pipes
			.iter()
			.map(|p| p.end_point)
			.fold(f64::NEG_INFINITY, f64::max);
		max - min
	}

	/// Start and end city names. The end is empty if the title has no separator.
	pub fn cities(&self) -> (&str, &str) {
		let mut parts = self.title.split(" - ");
		let start = parts.next().unwrap_or_default();
		let end = parts.next().unwrap_or_default();
		(start, end)
	}
}

/// A section of pipeline between two kilometre offsets.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Pipe {
	pub id: u64,
	pub start_point: f64,
	pub end_point: f64,
	#[serde(default)]
	pub diameter: Option<u32>,
	#[serde(default)]
	pub exploit_year: Option<u32>,
	#[serde(default)]
	pub state: Option<PipeState>,
	#[serde(default)]
	pub limit: Option<PipeLimit>,
	#[serde(default)]
	pub departments: Vec<PipeDepartment>,
}

impl Pipe {
	/// Fraction of the way from start to end, `0.0` for degenerate pipes.
	pub fn fraction_of(&self, point: f64) -> f64 {
		let length = self.end_point - self.start_point;
		if length.abs() < f64::EPSILON {
			0.0
		} else {
			(point - self.start_point) / length
		}
	}

	pub fn contains(&self, point: f64) -> bool {
		point >= self.start_point && point <= self.end_point
	}
}

/// Operational state categories of a pipe segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipeStateKind {
	Repair,
	Operation,
	Disabled,
	Limited,
	Depletion,
	Diagnostics,
	#[default]
	#[serde(other)]
	Unknown,
}

/// Current state of a pipe segment.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PipeState {
	#[serde(default)]
	pub state_type: PipeStateKind,
	#[serde(default)]
	pub state_type_display: Option<String>,
	/// Color assigned by the backend, takes precedence over the theme.
	#[serde(default)]
	pub color: Option<String>,
	#[serde(default)]
	pub current_pressure: Option<f64>,
	#[serde(default)]
	pub is_limited: bool,
	#[serde(default)]
	pub start_date: Option<String>,
}

/// Temporary pressure restriction on a pipe segment.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PipeLimit {
	pub pressure_limit: f64,
	#[serde(default)]
	pub limit_reason: Option<String>,
	#[serde(default)]
	pub start_date: Option<String>,
	#[serde(default)]
	pub end_date: Option<String>,
}

/// Department responsible for a sub-range of a pipe.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PipeDepartment {
	#[serde(default)]
	pub id: Option<u64>,
	pub name: String,
	#[serde(default)]
	pub start_point: Option<f64>,
	#[serde(default)]
	pub end_point: Option<f64>,
}

/// Kind of point feature on a pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
	Valve,
	Host,
	Bridge,
	#[default]
	#[serde(other)]
	Unknown,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStateKind {
	Open,
	Closed,
	#[default]
	#[serde(other)]
	Unknown,
}

/// Latest recorded state of a node.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NodeState {
	#[serde(default, alias = "state")]
	pub state_type: NodeStateKind,
	#[serde(default)]
	pub state_display: Option<String>,
	#[serde(default)]
	pub start_date: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Department {
	pub id: u64,
	pub name: String,
}

/// Valve fitted at a node, shown in the node tooltip.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ValveInfo {
	pub valve_type: String,
	#[serde(default)]
	pub diameter: Option<u32>,
	#[serde(default)]
	pub tech_number: String,
}

/// A valve, compressor host or bypass bridge placed on a pipeline.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Node {
	pub id: u64,
	#[serde(default)]
	pub node_type: NodeType,
	#[serde(default)]
	pub node_type_display: Option<String>,
	pub location_point: f64,
	#[serde(default)]
	pub state: Option<NodeState>,
	#[serde(default)]
	pub department: Option<Department>,
	#[serde(default)]
	pub valves: Vec<ValveInfo>,
}

impl Node {
	pub fn is_open(&self) -> bool {
		matches!(
			self.state.as_ref().map(|s| s.state_type),
			Some(NodeStateKind::Open)
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_backend_payload() {
		let json = r##"[{
			"order": 1,
			"title": "Moscow - Kazan",
			"description": "",
			"pipes": [
				{"id": 1, "start_point": 0.0, "end_point": 100.0, "diameter": 1420,
				 "state": {"state_type": "repair", "state_type_display": "Repair",
				           "color": "#ff0000", "current_pressure": 5.4, "is_limited": true},
				 "limit": {"pressure_limit": 4.2, "limit_reason": "corrosion"},
				 "departments": [{"id": 3, "name": "North", "start_point": 0.0, "end_point": 50.0}]},
				{"id": 2, "start_point": 100.0, "end_point": 250.0, "state": null, "limit": null}
			],
			"nodes": [
				{"id": 9, "node_type": "bridge", "location_point": 150.0,
				 "state": {"state_type": "open"}, "equipment": 4}
			]
		}]"##;

		let pipelines: Vec<Pipeline> = serde_json::from_str(json).unwrap();
		assert_eq!(pipelines.len(), 1);
		let p = &pipelines[0];
		assert_eq!(p.cities(), ("Moscow", "Kazan"));
		assert_eq!(p.total_length(), 250.0);
		assert_eq!(p.pipes[0].state.as_ref().unwrap().state_type, PipeStateKind::Repair);
		assert_eq!(p.pipes[0].limit.as_ref().unwrap().pressure_limit, 4.2);
		assert!(p.pipes[1].state.is_none());
		assert!(p.nodes[0].is_open());
	}

	#[test]
	fn unknown_variants_do_not_fail() {
		let json = r#"{"id": 1, "node_type": "pump", "location_point": 3.0,
			"state": {"state": "half"}}"#;
		let node: Node = serde_json::from_str(json).unwrap();
		assert_eq!(node.node_type, NodeType::Unknown);
		assert_eq!(node.state.unwrap().state_type, NodeStateKind::Unknown);
	}

	#[test]
	fn node_state_accepts_legacy_key() {
		let state: NodeState = serde_json::from_str(r#"{"state": "closed"}"#).unwrap();
		assert_eq!(state.state_type, NodeStateKind::Closed);
	}

	#[test]
	fn title_without_separator_has_empty_end() {
		let p = Pipeline {
			title: "Moscow".into(),
			..Default::default()
		};
		assert_eq!(p.cities(), ("Moscow", ""));
		assert_eq!(p.total_length(), 0.0);
	}
}
