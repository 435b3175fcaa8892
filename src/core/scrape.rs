use crate::domain::model::RawCountryRow;
use crate::utils::error::{EtlError, Result};
use scraper::{ElementRef, Html, Selector};

/// Positional index of the GDP table's `<tbody>` among all table bodies on the
/// archived page. Structural assumption about the snapshot layout: the first
/// two bodies belong to the infobox/sidebar tables, the third is the
/// countries-by-GDP table.
pub const GDP_TABLE_INDEX: usize = 2;

/// Placeholder shown on the page for countries with no reported estimate.
pub const NO_ESTIMATE: &str = "\u{2014}"; // em dash

fn selector(css: &str) -> Selector {
    // Selectors here are literals; parsing them cannot fail at runtime.
    Selector::parse(css).expect("valid CSS selector literal")
}

/// First cell carries a country hyperlink. Footnote and aggregate rows
/// (e.g. "World") link nothing in their first cell and are dropped.
pub fn has_country_link(cells: &[ElementRef]) -> bool {
    let link = selector("a");
    cells
        .first()
        .map(|cell| cell.select(&link).next().is_some())
        .unwrap_or(false)
}

/// Third cell holds an actual figure rather than the `—` placeholder.
/// Rows without a third cell count as unreported.
pub fn has_reported_estimate(cells: &[ElementRef]) -> bool {
    match cells.get(2) {
        Some(cell) => cell_text(cell) != NO_ESTIMATE,
        None => false,
    }
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Parse the page and pull one [`RawCountryRow`] per qualifying row of the GDP
/// table, preserving page order. Rows failing either filter predicate are
/// silently dropped.
pub fn parse_country_rows(html: &str) -> Result<Vec<RawCountryRow>> {
    let document = Html::parse_document(html);
    let tbody = selector("tbody");
    let tr = selector("tr");
    let td = selector("td");
    let link = selector("a");

    let bodies: Vec<ElementRef> = document.select(&tbody).collect();
    let table = bodies.get(GDP_TABLE_INDEX).ok_or_else(|| EtlError::Structure {
        message: format!(
            "expected at least {} <tbody> elements, found {}",
            GDP_TABLE_INDEX + 1,
            bodies.len()
        ),
    })?;

    let mut rows = Vec::new();
    for row in table.select(&tr) {
        let cells: Vec<ElementRef> = row.select(&td).collect();
        if cells.is_empty() {
            // header/separator row
            continue;
        }
        if !has_country_link(&cells) || !has_reported_estimate(&cells) {
            continue;
        }

        // Both predicates passed, so the link and the third cell exist.
        let country = cells[0]
            .select(&link)
            .next()
            .map(|a| cell_text(&a))
            .unwrap_or_default();
        let gdp_usd_millions = cell_text(&cells[2]);

        rows.push(RawCountryRow {
            country,
            gdp_usd_millions,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two decoy tbodies ahead of the GDP table, mirroring the snapshot layout.
    fn page(gdp_rows: &str) -> String {
        format!(
            "<html><body>\
             <table><tbody><tr><td>sidebar</td></tr></tbody></table>\
             <table><tbody><tr><td>infobox</td></tr></tbody></table>\
             <table><tbody>{}</tbody></table>\
             </body></html>",
            gdp_rows
        )
    }

    #[test]
    fn test_accepts_linked_rows_in_page_order() {
        let html = page(
            "<tr><th>Country</th><th>Region</th><th>Estimate</th></tr>\
             <tr><td><a href=\"/usa\">United States</a></td><td>Americas</td><td>26,854,599</td></tr>\
             <tr><td><a href=\"/chn\">China</a></td><td>Asia</td><td>19,373,586</td></tr>\
             <tr><td><a href=\"/jpn\">Japan</a></td><td>Asia</td><td>4,409,738</td></tr>",
        );

        let rows = parse_country_rows(&html).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].country, "United States");
        assert_eq!(rows[0].gdp_usd_millions, "26,854,599");
        assert_eq!(rows[1].country, "China");
        assert_eq!(rows[2].country, "Japan");
    }

    #[test]
    fn test_skips_rows_without_country_link() {
        let html = page(
            "<tr><td>World</td><td>—</td><td>105,568,776</td></tr>\
             <tr><td><a href=\"/deu\">Germany</a></td><td>Europe</td><td>4,308,854</td></tr>",
        );

        let rows = parse_country_rows(&html).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].country, "Germany");
    }

    #[test]
    fn test_skips_rows_with_placeholder_estimate() {
        let html = page(
            "<tr><td><a href=\"/cub\">Cuba</a></td><td>Americas</td><td>—</td></tr>\
             <tr><td><a href=\"/ind\">India</a></td><td>Asia</td><td>3,736,882</td></tr>",
        );

        let rows = parse_country_rows(&html).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].country, "India");
    }

    #[test]
    fn test_skips_header_rows_with_no_cells() {
        let html = page(
            "<tr><th>Country</th><th>Estimate</th></tr>\
             <tr><td><a href=\"/fra\">France</a></td><td>Europe</td><td>2,923,489</td></tr>",
        );

        let rows = parse_country_rows(&html).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_structure_error_when_gdp_table_missing() {
        let html = "<html><body><table><tbody><tr><td>only one</td></tr></tbody></table></body></html>";

        let err = parse_country_rows(html).unwrap_err();
        match err {
            EtlError::Structure { message } => {
                assert!(message.contains("expected at least 3"));
                assert!(message.contains("found 1"));
            }
            other => panic!("expected Structure error, got {:?}", other),
        }
    }

    #[test]
    fn test_predicates_directly() {
        let html = page(
            "<tr><td><a href=\"/x\">X</a></td><td>r</td><td>1,000</td></tr>\
             <tr><td>no link</td><td>r</td><td>2,000</td></tr>\
             <tr><td><a href=\"/y\">Y</a></td><td>r</td><td>—</td></tr>\
             <tr><td><a href=\"/z\">Z</a></td><td>too few cells</td></tr>",
        );
        let document = Html::parse_document(&html);
        let tbody = selector("tbody");
        let td = selector("td");
        let tr = selector("tr");

        let bodies: Vec<ElementRef> = document.select(&tbody).collect();
        let rows: Vec<Vec<ElementRef>> = bodies[GDP_TABLE_INDEX]
            .select(&tr)
            .map(|row| row.select(&td).collect())
            .collect();

        assert!(has_country_link(&rows[0]) && has_reported_estimate(&rows[0]));
        assert!(!has_country_link(&rows[1]));
        assert!(has_country_link(&rows[2]) && !has_reported_estimate(&rows[2]));
        assert!(!has_reported_estimate(&rows[3]));
    }
}
