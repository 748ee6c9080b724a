//! Closed symbol sets used by the client model.
//!
//! Every enum renders as its upper-case symbol on the wire (`"PERSON"`,
//! `"NEW_YORK"`, ...). Parsing is an exact, case-sensitive name match.

use std::str::FromStr;

use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{Error, Result};

// ─── Symbol lookup ───────────────────────────────────────────────────────────

/// An enum whose members are looked up by their exact wire symbol.
pub trait Symbol: FromStr + AsRef<str> + Copy {
  /// Human-readable name of the symbol set, used in error reports.
  const KIND: &'static str;

  /// Look up the member named `text`. No fallback member is ever substituted.
  fn from_symbol(text: &str) -> Result<Self> {
    Self::from_str(text).map_err(|_| Error::UnknownEnumValue {
      kind:  Self::KIND,
      value: text.to_owned(),
    })
  }
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// The mandatory discriminator of a [`Client`](crate::Client).
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString,
  AsRefStr, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ClientType {
  Person,
  /// An organisation; `last_name` carries the company name.
  Company,
}

impl Symbol for ClientType {
  const KIND: &'static str = "client type";
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString,
  AsRefStr, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
  Male,
  Female,
}

impl Symbol for Gender {
  const KIND: &'static str = "gender";
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString,
  AsRefStr, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MaritalStatus {
  Single,
  Married,
  CommonLaw,
  Separated,
  Divorced,
  Widowed,
}

impl Symbol for MaritalStatus {
  const KIND: &'static str = "marital status";
}

/// Key of the phone map. Ordering follows declaration order, which is also
/// the order phones are rendered in.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize,
  Display, EnumString, AsRefStr, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PhoneType {
  Home,
  Cellular,
  Office,
  Fax,
}

impl Symbol for PhoneType {
  const KIND: &'static str = "phone type";
}

// ─── Postal addresses ────────────────────────────────────────────────────────

/// Discriminator of a [`PostalAddress`](crate::PostalAddress).
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString,
  AsRefStr, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AddressType {
  Canada,
  Usa,
  Others,
}

impl AddressType {
  /// Display name of the country, as stored in a flat [`Address`](crate::Address).
  pub fn country_name(self) -> &'static str {
    match self {
      Self::Canada => "Canada",
      Self::Usa => "USA",
      Self::Others => "Others",
    }
  }
}

impl Symbol for AddressType {
  const KIND: &'static str = "address type";
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString,
  AsRefStr, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Province {
  Alberta,
  BritishColumbia,
  Manitoba,
  NewBrunswick,
  NewfoundlandAndLabrador,
  NorthwestTerritories,
  NovaScotia,
  Nunavut,
  Ontario,
  PrinceEdwardIsland,
  Quebec,
  Saskatchewan,
  Yukon,
}

impl Symbol for Province {
  const KIND: &'static str = "province";
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString,
  AsRefStr, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum State {
  Alabama,
  Alaska,
  Arizona,
  Arkansas,
  California,
  Colorado,
  Connecticut,
  Delaware,
  DistrictOfColumbia,
  Florida,
  Georgia,
  Hawaii,
  Idaho,
  Illinois,
  Indiana,
  Iowa,
  Kansas,
  Kentucky,
  Louisiana,
  Maine,
  Maryland,
  Massachusetts,
  Michigan,
  Minnesota,
  Mississippi,
  Missouri,
  Montana,
  Nebraska,
  Nevada,
  NewHampshire,
  NewJersey,
  NewMexico,
  NewYork,
  NorthCarolina,
  NorthDakota,
  Ohio,
  Oklahoma,
  Oregon,
  Pennsylvania,
  RhodeIsland,
  SouthCarolina,
  SouthDakota,
  Tennessee,
  Texas,
  Utah,
  Vermont,
  Virginia,
  Washington,
  WestVirginia,
  Wisconsin,
  Wyoming,
}

impl Symbol for State {
  const KIND: &'static str = "state";
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator;

  use super::*;

  #[test]
  fn symbols_are_screaming_snake_case() {
    assert_eq!(ClientType::Person.as_ref(), "PERSON");
    assert_eq!(MaritalStatus::CommonLaw.as_ref(), "COMMON_LAW");
    assert_eq!(State::NewYork.as_ref(), "NEW_YORK");
    assert_eq!(AddressType::Usa.as_ref(), "USA");
  }

  #[test]
  fn every_symbol_parses_back_to_itself() {
    for p in PhoneType::iter() {
      assert_eq!(PhoneType::from_symbol(p.as_ref()).unwrap(), p);
    }
    for p in Province::iter() {
      assert_eq!(Province::from_symbol(p.as_ref()).unwrap(), p);
    }
  }

  #[test]
  fn lookup_is_case_sensitive() {
    let err = Gender::from_symbol("male").unwrap_err();
    assert!(matches!(
      err,
      Error::UnknownEnumValue { kind: "gender", ref value } if value == "male"
    ));
  }

  #[test]
  fn serde_matches_strum() {
    for s in State::iter() {
      let json = serde_json::to_value(s).unwrap();
      assert_eq!(json.as_str(), Some(s.as_ref()));
    }
  }
}
