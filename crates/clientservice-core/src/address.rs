//! The flat postal address embedded in a client.

use serde::Serialize;

use crate::{Error, Result};

/// An immutable postal address.
///
/// `country` is the only mandatory field and must be supplied when the
/// builder is created, see [`Address::of_country`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
  #[serde(skip_serializing_if = "Option::is_none")]
  street_number:     Option<i32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  street_name:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  city:              Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  zipcode:           Option<String>,
  /// Free text; no per-country validation.
  #[serde(skip_serializing_if = "Option::is_none")]
  state_or_province: Option<String>,
  country:           String,
}

impl Address {
  /// Start building an address in `country`.
  ///
  /// Fails immediately with [`Error::CountryRequired`] when `country` is
  /// `None`; the check is never deferred to [`AddressBuilder::build`].
  pub fn of_country<C: Into<String>>(country: Option<C>) -> Result<AddressBuilder> {
    let country = country.ok_or(Error::CountryRequired)?.into();
    Ok(AddressBuilder {
      street_number: None,
      street_name: None,
      city: None,
      zipcode: None,
      state_or_province: None,
      country,
    })
  }

  /// A builder pre-populated with every field of `self`.
  pub fn to_builder(&self) -> AddressBuilder { AddressBuilder::from(self) }

  pub fn street_number(&self) -> Option<i32> { self.street_number }

  pub fn street_name(&self) -> Option<&str> { self.street_name.as_deref() }

  pub fn city(&self) -> Option<&str> { self.city.as_deref() }

  pub fn zipcode(&self) -> Option<&str> { self.zipcode.as_deref() }

  pub fn state_or_province(&self) -> Option<&str> {
    self.state_or_province.as_deref()
  }

  pub fn country(&self) -> &str { &self.country }
}

/// Fluent builder for [`Address`].
#[derive(Debug, Clone)]
pub struct AddressBuilder {
  street_number:     Option<i32>,
  street_name:       Option<String>,
  city:              Option<String>,
  zipcode:           Option<String>,
  state_or_province: Option<String>,
  country:           String,
}

impl AddressBuilder {
  pub fn with_street_number(mut self, street_number: i32) -> Self {
    self.street_number = Some(street_number);
    self
  }

  pub fn with_street_name(mut self, street_name: impl Into<String>) -> Self {
    self.street_name = Some(street_name.into());
    self
  }

  pub fn with_city(mut self, city: impl Into<String>) -> Self {
    self.city = Some(city.into());
    self
  }

  pub fn with_zipcode(mut self, zipcode: impl Into<String>) -> Self {
    self.zipcode = Some(zipcode.into());
    self
  }

  pub fn with_state_or_province(
    mut self,
    state_or_province: impl Into<String>,
  ) -> Self {
    self.state_or_province = Some(state_or_province.into());
    self
  }

  pub fn build(self) -> Address {
    Address {
      street_number:     self.street_number,
      street_name:       self.street_name,
      city:              self.city,
      zipcode:           self.zipcode,
      state_or_province: self.state_or_province,
      country:           self.country,
    }
  }
}

impl From<&Address> for AddressBuilder {
  fn from(address: &Address) -> Self {
    Self {
      street_number:     address.street_number,
      street_name:       address.street_name.clone(),
      city:              address.city.clone(),
      zipcode:           address.zipcode.clone(),
      state_or_province: address.state_or_province.clone(),
      country:           address.country.clone(),
    }
  }
}
