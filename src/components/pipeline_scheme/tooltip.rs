//! Hover texts for pipes and nodes.

use super::types::{Node, Pipe};

/// Multi-line description of a pipe's state, `None` for pipes without state.
pub fn pipe_tooltip(pipe: &Pipe) -> Option<String> {
	let state = pipe.state.as_ref()?;
	let mut lines = Vec::with_capacity(5);

	let display = state.state_type_display.as_deref().unwrap_or("—");
	lines.push(format!("State: {display}"));
	match state.current_pressure {
		Some(p) => lines.push(format!("Pressure: {p} MPa")),
		None => lines.push("Pressure: —".to_string()),
	}
	lines.push(format!(
		"Limited: {}",
		if state.is_limited { "Yes" } else { "No" }
	));

	if let Some(limit) = &pipe.limit {
		let mut line = format!("Limit: {} MPa", limit.pressure_limit);
		if let Some(reason) = limit.limit_reason.as_deref().filter(|r| !r.is_empty()) {
			line.push_str(&format!(" ({reason})"));
		}
		match (limit.start_date.as_deref(), limit.end_date.as_deref()) {
			(Some(start), Some(end)) => line.push_str(&format!(", {start} to {end}")),
			(Some(start), None) => line.push_str(&format!(", since {start}")),
			(None, Some(end)) => line.push_str(&format!(", until {end}")),
			(None, None) => {}
		}
		lines.push(line);
	}

	if !pipe.departments.is_empty() {
		let names: Vec<&str> = pipe.departments.iter().map(|d| d.name.as_str()).collect();
		lines.push(format!("Departments: {}", names.join(", ")));
	}

	Some(lines.join("\n"))
}

/// Node kind and department, then one line per fitted valve.
///
/// `None` when the node carries none of these.
pub fn node_tooltip(node: &Node) -> Option<String> {
	let mut lines = Vec::with_capacity(node.valves.len() + 2);
	if let Some(display) = node.node_type_display.as_deref().filter(|d| !d.is_empty()) {
		lines.push(display.to_string());
	}
	if let Some(department) = &node.department {
		lines.push(format!("Department: {}", department.name));
	}
	lines.extend(node.valves.iter().map(|v| {
		let diameter = v.diameter.map(|d| d.to_string()).unwrap_or_default();
		format!("{} DN{} ({})", v.valve_type, diameter, v.tech_number)
	}));

	if lines.is_empty() {
		None
	} else {
		Some(lines.join("\n"))
	}
}
