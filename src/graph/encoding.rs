//! Visual encoding rules: telemetry values to display attributes.

use std::fmt;

use super::error::GraphError;
use super::snapshot::{Node, ServiceType};

/// An sRGB color with 8-bit channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
}

impl Rgb {
	/// Color from channel values.
	pub const fn new(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}
}

impl fmt::Display for Rgb {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
	}
}

/// Parses `"42%"` (or a bare `"42"`) on the 0-100 scale.
pub fn parse_percentage(value: &str) -> Result<f64, GraphError> {
	let trimmed = value.trim();
	let number = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
	match number.parse::<f64>() {
		Ok(n) if n.is_finite() => Ok(n),
		_ => Err(GraphError::InvalidMetricFormat(value.to_string())),
	}
}

/// Border color for an error rate: green at 0%, red at 100%.
///
/// Rates outside 0-100% are clamped.
pub fn border_color_for(error_rate: &str) -> Result<Rgb, GraphError> {
	let fraction = (parse_percentage(error_rate)? / 100.0).clamp(0.0, 1.0);
	let red = (fraction * 255.0).round() as u8;
	Ok(Rgb::new(red, 255 - red, 0))
}

/// Result of the service-type icon lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ServiceIcon {
	/// A known service glyph.
	Glyph(&'static str),
	/// No icon for this service type.
	Unknown,
}

impl ServiceIcon {
	/// The glyph, or an empty string for [`ServiceIcon::Unknown`].
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Glyph(glyph) => glyph,
			Self::Unknown => "",
		}
	}
}

/// Icon for a service type.
pub fn icon_for(service_type: &ServiceType) -> ServiceIcon {
	match service_type {
		ServiceType::Api => ServiceIcon::Glyph("🔗"),
		ServiceType::Database => ServiceIcon::Glyph("💾"),
		ServiceType::Cache => ServiceIcon::Glyph("🗄️"),
		ServiceType::Worker => ServiceIcon::Glyph("👷"),
		ServiceType::Frontend => ServiceIcon::Glyph("🌐"),
		ServiceType::Unknown(_) => ServiceIcon::Unknown,
	}
}

/// Icon lookup by raw wire name. Never fails.
pub fn icon_for_name(name: &str) -> ServiceIcon {
	icon_for(&ServiceType::from_name(name))
}

/// What the canvas needs to draw one node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodePaint {
	/// Text drawn under the circle.
	pub label: String,
	/// Glyph drawn inside the circle.
	pub icon: ServiceIcon,
	/// Encoded border color, or the rejection for an unparseable error rate.
	pub border: Result<Rgb, GraphError>,
}

/// Node-drawing configuration handed to the rendering surface.
pub fn paint_node(node: &Node) -> NodePaint {
	NodePaint {
		label: node.id.clone(),
		icon: icon_for(&node.service_type),
		border: border_color_for(&node.error_rate),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_border_color_fixed_points() {
		assert_eq!(border_color_for("0%").unwrap(), Rgb::new(0, 255, 0));
		assert_eq!(border_color_for("100%").unwrap(), Rgb::new(255, 0, 0));
		assert_eq!(border_color_for("50%").unwrap(), Rgb::new(128, 127, 0));
	}

	#[test]
	fn test_border_color_channels_sum() {
		for tenth in 0..=1000 {
			let rate = format!("{}%", tenth as f64 / 10.0);
			let color = border_color_for(&rate).unwrap();
			let sum = color.r as i32 + color.g as i32;
			assert!((254..=256).contains(&sum), "{rate} -> {color}");
			assert_eq!(color.b, 0);
		}
	}

	#[test]
	fn test_border_color_clamps_out_of_range() {
		assert_eq!(border_color_for("250%").unwrap(), Rgb::new(255, 0, 0));
		assert_eq!(border_color_for("-5%").unwrap(), Rgb::new(0, 255, 0));
	}

	#[test]
	fn test_border_color_rejects_garbage() {
		assert_eq!(
			border_color_for("lots").unwrap_err(),
			GraphError::InvalidMetricFormat("lots".into())
		);
		assert!(border_color_for("%").is_err());
		assert!(border_color_for("NaN%").is_err());
	}

	#[test]
	fn test_parse_percentage_forms() {
		assert_eq!(parse_percentage("80%").unwrap(), 80.0);
		assert_eq!(parse_percentage(" 12.5 % ").unwrap(), 12.5);
		assert_eq!(parse_percentage("7").unwrap(), 7.0);
	}

	#[test]
	fn test_icon_lookup() {
		assert_eq!(icon_for(&ServiceType::Api), ServiceIcon::Glyph("🔗"));
		assert_eq!(icon_for_name("API"), ServiceIcon::Glyph("🔗"));
		assert_eq!(icon_for_name("Unknown"), ServiceIcon::Unknown);
		assert_eq!(icon_for_name("Mainframe").as_str(), "");
		for ty in ServiceType::ALL {
			assert_ne!(icon_for(&ty), ServiceIcon::Unknown, "{ty}");
		}
	}

	#[test]
	fn test_rgb_css() {
		assert_eq!(Rgb::new(255, 0, 0).to_string(), "rgb(255, 0, 0)");
	}

	#[test]
	fn test_paint_node() {
		let node = Node::new("Node5", ServiceType::Frontend, "100%");
		let paint = paint_node(&node);
		assert_eq!(paint.label, "Node5");
		assert_eq!(paint.icon, ServiceIcon::Glyph("🌐"));
		assert_eq!(paint.border, Ok(Rgb::new(255, 0, 0)));

		let broken = Node::new("x", ServiceType::Unknown("Batch".into()), "n/a");
		assert!(paint_node(&broken).border.is_err());
	}
}
