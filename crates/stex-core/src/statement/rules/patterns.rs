//! Common regex patterns for statement field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Account number forms in the filename account section. The dash+period
    // form is the BOK convention (e.g. 1150-0007431.1); the simple form
    // covers WFA (e.g. 2193-4125).
    pub static ref ACCOUNT_FULL: Regex = Regex::new(
        r"(\d+-\d+\.\d+)"
    ).unwrap();

    pub static ref ACCOUNT_SIMPLE: Regex = Regex::new(
        r"(\d+-\d+(?:\.\d+)?)"
    ).unwrap();

    // Beneficiary codes are 2-4 letter abbreviations in the entity section
    pub static ref BENEFICIARY_CODE: Regex = Regex::new(
        r"^[A-Za-z]{2,4}$"
    ).unwrap();

    // Warehouse marker spellings seen in filenames; never a beneficiary
    pub static ref WAREHOUSE_MARKER: Regex = Regex::new(
        r"(?i)^(WH|Warehouse|Whse|Whouse|Warehse)$"
    ).unwrap();

    // Page labels; whitespace between tokens is unreliably preserved by
    // the upstream text source ("Page2of30")
    pub static ref PAGE_ONE_MARKER: Regex = Regex::new(
        r"Page\s*1\s*of\s*\d+"
    ).unwrap();

    pub static ref PAGE_TWO_MARKER: Regex = Regex::new(
        r"Page\s*2\s*of\s*\d+"
    ).unwrap();

    // BOK account overview heading, with or without internal whitespace
    pub static ref ACCOUNT_OVERVIEW: Regex = Regex::new(
        r"Account\s*Overview"
    ).unwrap();
}
