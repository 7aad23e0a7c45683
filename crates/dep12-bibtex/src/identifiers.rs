//! Identifier validation functions

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // DOI: 10.<registrant>[.<sub>]/<suffix>
    static ref DOI_PATTERN: Regex = Regex::new(r"^10\.\d{4,}(\.\d+)*/\S+$").unwrap();

    // arXiv ID (new format: YYMM.NNNNN, old format: archive/NNNNNNN)
    static ref ARXIV_NEW_PATTERN: Regex = Regex::new(r"^\d{4}\.\d{4,5}(v\d+)?$").unwrap();
    static ref ARXIV_OLD_PATTERN: Regex = Regex::new(r"^[a-z-]+(\.[A-Z]{2})?/\d{7}(v\d+)?$").unwrap();

    static ref ISSN_PATTERN: Regex = Regex::new(r"^(\d{4})-?(\d{3})([\dXx])$").unwrap();
    static ref PMID_PATTERN: Regex = Regex::new(r"^[1-9]\d{0,8}$").unwrap();
}

pub fn is_valid_doi(doi: &str) -> bool {
    DOI_PATTERN.is_match(doi)
}

pub fn is_valid_arxiv_id(arxiv_id: &str) -> bool {
    ARXIV_NEW_PATTERN.is_match(arxiv_id) || ARXIV_OLD_PATTERN.is_match(arxiv_id)
}

/// ISBN-10 or ISBN-13 with a correct check digit; hyphens and spaces allowed
pub fn is_valid_isbn(isbn: &str) -> bool {
    if isbn
        .chars()
        .any(|c| !(c.is_ascii_digit() || c == 'X' || c == 'x' || c == '-' || c == ' '))
    {
        return false;
    }
    let normalized: String = isbn
        .chars()
        .filter(|c| !matches!(c, '-' | ' '))
        .collect::<String>()
        .to_uppercase();

    match normalized.len() {
        10 => validate_isbn10(&normalized),
        13 => validate_isbn13(&normalized),
        _ => false,
    }
}

/// ISSN in `NNNN-NNNC` form with a correct mod-11 check character
pub fn is_valid_issn(issn: &str) -> bool {
    let Some(caps) = ISSN_PATTERN.captures(issn.trim()) else {
        return false;
    };
    let digits: Vec<u32> = caps[1]
        .chars()
        .chain(caps[2].chars())
        .filter_map(|c| c.to_digit(10))
        .collect();

    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (8 - i as u32))
        .sum();
    let expected = match (11 - sum % 11) % 11 {
        10 => 'X',
        n => char::from_digit(n, 10).unwrap_or('?'),
    };
    caps[3].eq_ignore_ascii_case(&expected.to_string())
}

/// PubMed identifier: a positive integer of up to nine digits
pub fn is_valid_pmid(pmid: &str) -> bool {
    PMID_PATTERN.is_match(pmid)
}

fn validate_isbn10(isbn: &str) -> bool {
    let mut sum = 0u32;
    for (i, c) in isbn.chars().enumerate() {
        let value = match c {
            'X' if i == 9 => 10,
            _ => match c.to_digit(10) {
                Some(d) => d,
                None => return false,
            },
        };
        sum += value * (10 - i as u32);
    }
    sum % 11 == 0
}

fn validate_isbn13(isbn: &str) -> bool {
    let mut sum = 0u32;
    for (i, c) in isbn.chars().enumerate() {
        let Some(d) = c.to_digit(10) else {
            return false;
        };
        sum += if i % 2 == 0 { d } else { d * 3 };
    }
    sum % 10 == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("10.1038/nature12373", true)]
    #[case("10.1126/science.1234567", true)]
    #[case("10.1000.10/182", true)]
    #[case("11.1038/nature12373", false)]
    #[case("10.12/test", false)]
    #[case("10.1038/with space", false)]
    #[case("nature12373", false)]
    fn test_doi(#[case] doi: &str, #[case] valid: bool) {
        assert_eq!(is_valid_doi(doi), valid, "{}", doi);
    }

    #[rstest]
    #[case("0-306-40615-2", true)]
    #[case("978-0-321-12521-7", true)]
    #[case("080442957X", true)]
    #[case("978 0 321 12521 7", true)]
    #[case("0-306-40615-1", false)]
    #[case("978-0-321-12521-8", false)]
    #[case("X804429570", false)]
    #[case("ISBN 0306406152", false)]
    #[case("12345", false)]
    fn test_isbn(#[case] isbn: &str, #[case] valid: bool) {
        assert_eq!(is_valid_isbn(isbn), valid, "{}", isbn);
    }

    #[rstest]
    #[case("0317-8471", true)]
    #[case("2049-3630", true)]
    #[case("0000-006X", true)]
    #[case("1050-124X", true)]
    #[case("0317-8472", false)]
    #[case("03178471", true)]
    #[case("0317-847", false)]
    fn test_issn(#[case] issn: &str, #[case] valid: bool) {
        assert_eq!(is_valid_issn(issn), valid, "{}", issn);
    }

    #[rstest]
    #[case("2301.12345", true)]
    #[case("1905.07890v2", true)]
    #[case("cond-mat/9901001", true)]
    #[case("math.GT/0309136", true)]
    #[case("2301.123", false)]
    fn test_arxiv(#[case] id: &str, #[case] valid: bool) {
        assert_eq!(is_valid_arxiv_id(id), valid, "{}", id);
    }

    #[test]
    fn test_pmid() {
        assert!(is_valid_pmid("12345678"));
        assert!(!is_valid_pmid("012345"));
        assert!(!is_valid_pmid("PMC12345"));
    }
}
