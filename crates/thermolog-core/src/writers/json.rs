use crate::domain::BatchResult;

pub fn render_json(batch: &BatchResult) -> Result<String, serde_json::Error> {
    let mut rendered = serde_json::to_string_pretty(batch)?;
    rendered.push('\n');
    Ok(rendered)
}
