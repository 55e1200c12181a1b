use super::colors::ColorMap;
use crate::usage::UsageItem;

/// matplotlib's `tab10`, used for items without a resolved color
pub const TAB10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

pub fn default_color(position: usize) -> &'static str {
    TAB10[position % TAB10.len()]
}

/// Color for each dataset position: the key spelled exactly like the item,
/// else the first key (in map order) equal to it ignoring case, else the
/// default palette color for that position.
pub fn map_colors(colors: &ColorMap, items: &[UsageItem]) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            colors
                .get(&item.name)
                .or_else(|| {
                    colors
                        .iter()
                        .find(|(key, _)| item.is_named(key))
                        .map(|(_, color)| color)
                })
                .cloned()
                .unwrap_or_else(|| default_color(idx).to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usage::item;

    #[test]
    fn test_map_colors_case_insensitive() {
        let colors: ColorMap = [("python".to_string(), "#3572A5".to_string())].into();
        let items = vec![item("Python", 1.0, 0, 0), item("Go", 1.0, 0, 0)];

        let mapped = map_colors(&colors, &items);
        assert_eq!(mapped, vec!["#3572A5", TAB10[1]]);
    }

    #[test]
    fn test_map_colors_prefers_exact_spelling() {
        let colors: ColorMap = [
            ("PYTHON".to_string(), "#111111".to_string()),
            ("Python".to_string(), "#222222".to_string()),
            ("python".to_string(), "#333333".to_string()),
        ]
        .into();

        let mapped = map_colors(&colors, &[item("python", 1.0, 0, 0), item("PyThOn", 1.0, 0, 0)]);
        assert_eq!(mapped, vec!["#333333", "#111111"]);
    }

    #[test]
    fn test_default_palette_cycles() {
        assert_eq!(default_color(0), "#1f77b4");
        assert_eq!(default_color(10), "#1f77b4");
        assert_eq!(default_color(13), "#d62728");
    }
}
