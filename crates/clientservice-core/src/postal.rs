//! Country-specific postal addresses.
//!
//! A [`PostalAddress`] is exactly one of three shapes selected by its
//! [`AddressType`]. Each shape has its own builder, so a setter that does not
//! belong to a shape cannot be called on it; accessors that do not apply to a
//! shape return `None` (or an empty slice).

use serde::Serialize;

use crate::{
  Address, Result,
  enums::{AddressType, Province, State},
};

// ─── Shapes ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CanadianAddress {
  #[serde(skip_serializing_if = "Option::is_none")]
  street_number: Option<i32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  street_name:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  city:          Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  province:      Option<Province>,
  #[serde(skip_serializing_if = "Option::is_none")]
  postal_code:   Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UsAddress {
  #[serde(skip_serializing_if = "Option::is_none")]
  address_line: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  city:         Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  state:        Option<State>,
  #[serde(skip_serializing_if = "Option::is_none")]
  zip_code:     Option<u32>,
}

/// An address outside Canada and the USA: free-text lines plus a country.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InternationalAddress {
  #[serde(skip_serializing_if = "Vec::is_empty")]
  lines:   Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  country: Option<String>,
}

/// A postal address in one of the supported country shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "address_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostalAddress {
  Canada(CanadianAddress),
  Usa(UsAddress),
  Others(InternationalAddress),
}

impl PostalAddress {
  pub fn canada() -> CanadaBuilder { CanadaBuilder::default() }

  pub fn usa() -> UsaBuilder { UsaBuilder::default() }

  pub fn others() -> OthersBuilder { OthersBuilder::default() }

  pub fn address_type(&self) -> AddressType {
    match self {
      Self::Canada(_) => AddressType::Canada,
      Self::Usa(_) => AddressType::Usa,
      Self::Others(_) => AddressType::Others,
    }
  }

  /// Country name. Fixed for Canada and the USA, free text otherwise.
  pub fn country(&self) -> Option<&str> {
    match self {
      Self::Canada(_) | Self::Usa(_) => Some(self.address_type().country_name()),
      Self::Others(a) => a.country.as_deref(),
    }
  }

  pub fn city(&self) -> Option<&str> {
    match self {
      Self::Canada(a) => a.city.as_deref(),
      Self::Usa(a) => a.city.as_deref(),
      Self::Others(_) => None,
    }
  }

  pub fn street_number(&self) -> Option<i32> {
    match self {
      Self::Canada(a) => a.street_number,
      Self::Usa(_) | Self::Others(_) => None,
    }
  }

  pub fn street_name(&self) -> Option<&str> {
    match self {
      Self::Canada(a) => a.street_name.as_deref(),
      Self::Usa(_) | Self::Others(_) => None,
    }
  }

  pub fn province(&self) -> Option<Province> {
    match self {
      Self::Canada(a) => a.province,
      Self::Usa(_) | Self::Others(_) => None,
    }
  }

  pub fn postal_code(&self) -> Option<&str> {
    match self {
      Self::Canada(a) => a.postal_code.as_deref(),
      Self::Usa(_) | Self::Others(_) => None,
    }
  }

  pub fn address_line(&self) -> Option<&str> {
    match self {
      Self::Usa(a) => a.address_line.as_deref(),
      Self::Canada(_) | Self::Others(_) => None,
    }
  }

  pub fn state(&self) -> Option<State> {
    match self {
      Self::Usa(a) => a.state,
      Self::Canada(_) | Self::Others(_) => None,
    }
  }

  pub fn zip_code(&self) -> Option<u32> {
    match self {
      Self::Usa(a) => a.zip_code,
      Self::Canada(_) | Self::Others(_) => None,
    }
  }

  pub fn lines(&self) -> &[String] {
    match self {
      Self::Others(a) => &a.lines,
      Self::Canada(_) | Self::Usa(_) => &[],
    }
  }

  /// Flatten into the free-text [`Address`] carried by a client.
  ///
  /// Fails with [`Error::CountryRequired`](crate::Error::CountryRequired)
  /// for an international address without a country.
  pub fn to_address(&self) -> Result<Address> {
    let address = match self {
      Self::Canada(a) => {
        let mut b = Address::of_country(self.country())?;
        if let Some(n) = a.street_number {
          b = b.with_street_number(n);
        }
        if let Some(s) = &a.street_name {
          b = b.with_street_name(s);
        }
        if let Some(c) = &a.city {
          b = b.with_city(c);
        }
        if let Some(p) = a.province {
          b = b.with_state_or_province(p.as_ref());
        }
        if let Some(z) = &a.postal_code {
          b = b.with_zipcode(z);
        }
        b.build()
      }
      Self::Usa(a) => {
        let mut b = Address::of_country(self.country())?;
        if let Some(l) = &a.address_line {
          b = b.with_street_name(l);
        }
        if let Some(c) = &a.city {
          b = b.with_city(c);
        }
        if let Some(s) = a.state {
          b = b.with_state_or_province(s.as_ref());
        }
        if let Some(z) = a.zip_code {
          b = b.with_zipcode(format!("{z:05}"));
        }
        b.build()
      }
      Self::Others(a) => {
        let b = Address::of_country(a.country.as_deref())?;
        if a.lines.is_empty() {
          b.build()
        } else {
          b.with_street_name(a.lines.join(", ")).build()
        }
      }
    };
    Ok(address)
  }
}

// ─── Builders ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct CanadaBuilder(CanadianAddress);

impl CanadaBuilder {
  pub fn street_number(mut self, street_number: i32) -> Self {
    self.0.street_number = Some(street_number);
    self
  }

  pub fn street_name(mut self, street_name: impl Into<String>) -> Self {
    self.0.street_name = Some(street_name.into());
    self
  }

  pub fn city(mut self, city: impl Into<String>) -> Self {
    self.0.city = Some(city.into());
    self
  }

  pub fn province(mut self, province: Province) -> Self {
    self.0.province = Some(province);
    self
  }

  pub fn postal_code(mut self, postal_code: impl Into<String>) -> Self {
    self.0.postal_code = Some(postal_code.into());
    self
  }

  pub fn build(self) -> PostalAddress { PostalAddress::Canada(self.0) }
}

#[derive(Debug, Clone, Default)]
pub struct UsaBuilder(UsAddress);

impl UsaBuilder {
  pub fn address_line(mut self, address_line: impl Into<String>) -> Self {
    self.0.address_line = Some(address_line.into());
    self
  }

  pub fn city(mut self, city: impl Into<String>) -> Self {
    self.0.city = Some(city.into());
    self
  }

  pub fn state(mut self, state: State) -> Self {
    self.0.state = Some(state);
    self
  }

  pub fn zip_code(mut self, zip_code: u32) -> Self {
    self.0.zip_code = Some(zip_code);
    self
  }

  pub fn build(self) -> PostalAddress { PostalAddress::Usa(self.0) }
}

#[derive(Debug, Clone, Default)]
pub struct OthersBuilder(InternationalAddress);

impl OthersBuilder {
  /// Append one free-text line; lines keep insertion order.
  pub fn with_line(mut self, line: impl Into<String>) -> Self {
    self.0.lines.push(line.into());
    self
  }

  pub fn country(mut self, country: impl Into<String>) -> Self {
    self.0.country = Some(country.into());
    self
  }

  pub fn build(self) -> PostalAddress { PostalAddress::Others(self.0) }
}
