use crate::element::element_model::{Element, OPTION_CONTAINER_ROLES};

pub const DEFAULT_LABEL_CHARS: usize = 40;
const OPTION_LABEL_CHARS: usize = 30;

/// `<id>:<role>|<primary text>[|p=<parent>]`
pub fn format_planner_line(el: &Element) -> String {
    format_planner_line_with(el, DEFAULT_LABEL_CHARS)
}

pub fn format_planner_line_with(el: &Element, max_chars: usize) -> String {
    let primary: String = el
        .primary_text()
        .replace(['\n', '\r'], " ")
        .replace('|', "")
        .chars()
        .take(max_chars)
        .collect();

    let mut line = format!("{}:{}|{}", el.id, el.role, primary);
    if let Some(parent) = &el.parent {
        line.push_str("|p=");
        line.push_str(parent);
    }
    line
}

/// Render elements one per line, optionally folding the `option` run that
/// follows a combobox or listbox into the container's line.
pub fn render_lines(elements: &[Element], compress_options: bool, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(elements.len());
    let mut i = 0;

    while i < elements.len() {
        let el = &elements[i];
        let mut line = format_planner_line_with(el, max_chars);
        i += 1;

        if compress_options && OPTION_CONTAINER_ROLES.contains(&el.role.as_str()) {
            let options: Vec<String> = elements[i..]
                .iter()
                .take_while(|next| next.role == "option")
                .map(option_entry)
                .collect();

            if !options.is_empty() {
                i += options.len();
                line.push_str(&format!(" | options[{}]", options.join(", ")));
            }
        }

        lines.push(line);
    }

    lines
}

fn option_entry(el: &Element) -> String {
    let label: String = el
        .primary_text()
        .trim()
        .replace(['\n', '\r'], "")
        .chars()
        .take(OPTION_LABEL_CHARS)
        .collect();
    format!("{}:{}", el.id, label)
}
