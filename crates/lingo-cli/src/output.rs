use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print up to `limit` items as an indented list, then a "... and N more"
/// line for the rest.
pub fn print_capped<T: std::fmt::Display>(items: &[T], limit: usize) {
    for item in items.iter().take(limit) {
        println!("   - {item}");
    }
    if items.len() > limit {
        println!("   ... and {} more", items.len() - limit);
    }
}
