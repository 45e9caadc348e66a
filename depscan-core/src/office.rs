//! Practice offices that statements are attributed to

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Office {
    Union,
    Livingston,
    Kearny,
    Hackensack,
    JerseyCity,
    Passaic,
}

impl Office {
    /// Search order. Multi-word names come first so "JERSEY CITY" is never
    /// shadowed by a shorter key.
    pub const ALL: [Office; 6] = [
        Office::JerseyCity,
        Office::Hackensack,
        Office::Livingston,
        Office::Passaic,
        Office::Kearny,
        Office::Union,
    ];

    /// Upper-case key searched for in filenames and statement text
    pub fn key(&self) -> &'static str {
        match self {
            Office::Union => "UNION",
            Office::Livingston => "LIVINGSTON",
            Office::Kearny => "KEARNY",
            Office::Hackensack => "HACKENSACK",
            Office::JerseyCity => "JERSEY CITY",
            Office::Passaic => "PASSAIC",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Office::Union => "Union",
            Office::Livingston => "Livingston",
            Office::Kearny => "Kearny",
            Office::Hackensack => "Hackensack",
            Office::JerseyCity => "Jersey City",
            Office::Passaic => "Passaic",
        }
    }

    /// First office whose key occurs in already upper-cased text
    pub fn find_in_upper(upper: &str) -> Option<Office> {
        Office::ALL.into_iter().find(|o| upper.contains(o.key()))
    }
}

impl fmt::Display for Office {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where the office attribution came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OfficeSource {
    Filename,
    PdfContent,
    Unknown,
}
