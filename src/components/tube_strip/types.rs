//! Tube records of a single pipe segment.

use serde::Deserialize;

/// One manufactured tube inside a pipe segment.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Tube {
	pub id: u64,
	pub tube_num: u32,
	#[serde(default)]
	pub diameter: Option<f64>,
	#[serde(default)]
	pub thickness: Option<f64>,
	/// Length in metres.
	pub tube_length: f64,
	#[serde(default)]
	pub tube_type: Option<String>,
}

impl Tube {
	pub fn tooltip(&self) -> String {
		let opt = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_else(|| "—".into());
		format!(
			"Tube #{}\nDiameter: {} mm\nThickness: {} mm\nLength: {} m\nType: {}",
			self.tube_num,
			opt(self.diameter),
			opt(self.thickness),
			self.tube_length,
			self.tube_type.as_deref().unwrap_or("—"),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_and_describes_tube() {
		let tube: Tube = serde_json::from_str(
			r#"{"id": 4, "tube_num": 12, "diameter": 1420, "thickness": 18.7,
			    "tube_length": 11.6, "tube_type": "straight-seam", "pipe_name": "ignored"}"#,
		)
		.unwrap();

		assert_eq!(
			tube.tooltip(),
			"Tube #12\nDiameter: 1420 mm\nThickness: 18.7 mm\nLength: 11.6 m\nType: straight-seam"
		);
	}
}
