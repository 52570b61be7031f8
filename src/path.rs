use crate::geometry::Segment;

/// Dash count above which a dashed line is drawn solid instead.
pub const MAX_DASHES: f32 = 2_000.0;

/// Generate SVG path command for a straight line
///
/// # Returns
/// SVG path command string (e.g., "M 10 20 L 140 80")
pub fn line_path(segment: &Segment) -> String {
    format!(
        "M {} {} L {} {}",
        segment.start.x, segment.start.y, segment.end.x, segment.end.y
    )
}

/// Generate SVG path commands for a dashed straight line
///
/// Slint's `Path` has no dash pattern, so the dashes are emitted as separate
/// move/line pairs.
///
/// # Arguments
/// * `segment` - Line to dash
/// * `dash` - Length of each drawn dash
/// * `gap` - Length of each gap between dashes
///
/// Falls back to a solid line when the pattern would need more than
/// [`MAX_DASHES`] dashes.
pub fn dashed_line_path(segment: &Segment, dash: f32, gap: f32) -> String {
    let length = segment.length();
    let period = dash + gap.max(0.0);
    if !(length > 0.0 && dash > 0.0) || length / period > MAX_DASHES {
        return line_path(segment);
    }

    let (sx, sy) = (segment.start.x, segment.start.y);
    let ux = (segment.end.x - sx) / length;
    let uy = (segment.end.y - sy) / length;

    let mut commands = String::new();
    let mut t = 0.0;
    while t < length {
        let t_end = (t + dash).min(length);
        if !commands.is_empty() {
            commands.push(' ');
        }
        commands.push_str(&format!(
            "M {} {} L {} {}",
            sx + ux * t,
            sy + uy * t,
            sx + ux * t_end,
            sy + uy * t_end
        ));
        t += period;
    }
    commands
}
