use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, CellAlignment, ContentArrangement};

use cepan::table::{Cell as TableCell, Table};

fn format_cell(value: &TableCell) -> Cell {
    match value {
        TableCell::Null => Cell::new(""),
        TableCell::Text(s) => Cell::new(s),
        TableCell::Float(v) => Cell::new(v).set_alignment(CellAlignment::Right),
        TableCell::Int(v) => Cell::new(v).set_alignment(CellAlignment::Right),
    }
}

pub fn render_table(table: &Table) -> comfy_table::Table {
    let mut out = comfy_table::Table::new();
    out.load_preset(UTF8_FULL_CONDENSED);
    out.set_content_arrangement(ContentArrangement::Dynamic);
    out.set_header(table.columns().iter().map(Cell::new));
    for row in table.rows() {
        out.add_row(row.iter().map(format_cell));
    }
    out
}

pub fn print_table(table: &Table) {
    println!("{}", render_table(table));
}

pub fn print_json(table: &Table) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(table)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_header_and_formatted_amounts() {
        let mut table = Table::new(["Time", "BlendedCost"]);
        table.push_row(vec![TableCell::Text("2021-01-01".into()), TableCell::Float(1.234)]);
        table.push_row(vec![TableCell::Text("2021-01-02".into())]);
        let rendered = render_table(&table).to_string();
        assert!(rendered.contains("BlendedCost"));
        assert!(rendered.contains("1.234"));
        assert!(rendered.contains("2021-01-02"));
    }

    #[test]
    fn small_amounts_are_not_rounded_away() {
        let mut table = Table::new(["Time", "UsageQuantity"]);
        table.push_row(vec![TableCell::Text("2021-01-01".into()), TableCell::Float(0.0000012)]);
        let rendered = render_table(&table).to_string();
        assert!(rendered.contains("0.0000012"));
    }
}
