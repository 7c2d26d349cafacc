//! Collection wrapper types for displaying groups of records.
//!
//! Each wrapper formats its records one after another and prints a single
//! "No ... found." line when empty.

use std::{fmt, ops::Index};

use crate::models::{Airport, Carrier, Quote, Route};

/// Newtype wrapper for displaying collections of carriers.
///
/// # Examples
///
/// ```rust
/// use farewatch_core::{display::Carriers, Carrier};
///
/// let carriers = Carriers(vec![Carrier::new(2, "Virgin Airways")]);
/// assert!(carriers.to_string().contains("Virgin Airways"));
/// assert_eq!(Carriers(vec![]).to_string(), "No carriers found.\n");
/// ```
pub struct Carriers(pub Vec<Carrier>);

impl Carriers {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of carriers in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the carriers.
    pub fn iter(&self) -> std::slice::Iter<'_, Carrier> {
        self.0.iter()
    }
}

impl Index<usize> for Carriers {
    type Output = Carrier;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Carriers {
    type Item = Carrier;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Carriers {
    type Item = &'a Carrier;
    type IntoIter = std::slice::Iter<'a, Carrier>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Carriers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No carriers found.")
        } else {
            for item in &self.0 {
                write!(f, "{item}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying collections of airports.
pub struct Airports(pub Vec<Airport>);

impl Airports {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of airports in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the airports.
    pub fn iter(&self) -> std::slice::Iter<'_, Airport> {
        self.0.iter()
    }
}

impl Index<usize> for Airports {
    type Output = Airport;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Airports {
    type Item = Airport;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Airports {
    type Item = &'a Airport;
    type IntoIter = std::slice::Iter<'a, Airport>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Airports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No airports found.")
        } else {
            for item in &self.0 {
                write!(f, "{item}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying collections of routes.
pub struct Routes(pub Vec<Route>);

impl Routes {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of routes in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the routes.
    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.0.iter()
    }
}

impl Index<usize> for Routes {
    type Output = Route;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Routes {
    type Item = Route;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Routes {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Routes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No routes found.")
        } else {
            for item in &self.0 {
                write!(f, "{item}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying collections of quotes.
///
/// Used for query results, which the CLI prints oldest first.
pub struct Quotes(pub Vec<Quote>);

impl Quotes {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of quotes in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the quotes.
    pub fn iter(&self) -> std::slice::Iter<'_, Quote> {
        self.0.iter()
    }
}

impl Index<usize> for Quotes {
    type Output = Quote;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Quotes {
    type Item = Quote;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Quotes {
    type Item = &'a Quote;
    type IntoIter = std::slice::Iter<'a, Quote>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Quotes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No quotes found.")
        } else {
            for item in &self.0 {
                write!(f, "{item}")?;
            }
            Ok(())
        }
    }
}

/// Table names reported by the store, one bullet per table.
pub struct Tables(pub Vec<String>);

impl fmt::Display for Tables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No tables found.");
        }
        writeln!(f, "## Tables")?;
        writeln!(f)?;
        for table in &self.0 {
            writeln!(f, "- {table}")?;
        }
        Ok(())
    }
}
