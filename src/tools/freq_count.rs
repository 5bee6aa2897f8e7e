use crate::huffman_coding::freq_table::FrequencyTable;

/// Literals are counted and coded in their quoted lexical form.
pub const QUOTE: char = '"';

/// Wrap a literal in double quotes.
pub fn quote(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len() + 2);
    out.push(QUOTE);
    out.push_str(literal);
    out.push(QUOTE);
    out
}

/// Strip one pair of surrounding double quotes, if present.
pub fn unquote(text: &str) -> &str {
    text.strip_prefix(QUOTE)
        .and_then(|t| t.strip_suffix(QUOTE))
        .unwrap_or(text)
}

/// The symbols a literal is coded as.
pub fn literal_symbols(literal: &str, quoted: bool) -> Vec<char> {
    if quoted {
        quote(literal).chars().collect()
    } else {
        literal.chars().collect()
    }
}

/// Returns a frequency count of the characters in `literals`, in first-seen order.
pub fn freqs<'a, I: IntoIterator<Item = &'a str>>(literals: I, quoted: bool) -> FrequencyTable<char> {
    let mut table = FrequencyTable::new();
    for literal in literals {
        table.add_all(literal_symbols(literal, quoted));
    }
    table
}

#[test]
fn quoted_count_test() {
    let table = freqs(["ab", "b"], true);
    let entries: Vec<_> = table.iter().collect();
    assert_eq!(entries, vec![('"', 4), ('a', 1), ('b', 2)]);
}

#[test]
fn raw_count_test() {
    let table = freqs(["ab", "", "b"], false);
    let entries: Vec<_> = table.iter().collect();
    assert_eq!(entries, vec![('a', 1), ('b', 2)]);
}

#[test]
fn quote_test() {
    assert_eq!(quote("x y"), "\"x y\"");
    assert_eq!(unquote("\"x y\""), "x y");
    assert_eq!(unquote("x\""), "x\"");
    assert_eq!(unquote("\"\""), "");
    assert_eq!(literal_symbols("é", true), vec!['"', 'é', '"']);
}
