//! Ready-made string format predicates.
use once_cell::sync::Lazy;
use regex::Regex;

use crate::schema::{Predicate, StringRestriction};

// Same local-part/domain shape browsers use for `<input type=email>`.
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@",
        r"[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?",
        r"(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    ))
    .expect("email pattern compiles")
});

// scheme://host[:port][/path][?query][#fragment]; host is a dotted name, `localhost`, or IPv4.
static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?i:https?|ftp)://",
        r"(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?",
        r"(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*\.[A-Za-z]{2,}",
        r"|localhost|\d{1,3}(?:\.\d{1,3}){3})",
        r"(?::\d{1,5})?(?:[/?#][^\s]*)?$",
    ))
    .expect("url pattern compiles")
});

pub fn is_email(s: &str) -> bool {
    EMAIL.is_match(s)
}

pub fn is_url(s: &str) -> bool {
    URL.is_match(s)
}

pub fn email() -> StringRestriction {
    Predicate::<str>::new("must be a valid email address", is_email).into()
}

pub fn url() -> StringRestriction {
    Predicate::<str>::new("must be a valid http(s) or ftp URL", is_url).into()
}
