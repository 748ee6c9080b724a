//! The client aggregate and its builder.
//!
//! A [`Client`] is immutable. It is created once through
//! [`Client::of_type`] and never changed in place; an "update" builds a new
//! client from an existing one:
//!
//! ```
//! use clientservice_core::{Client, enums::ClientType};
//!
//! let ken = Client::of_type(ClientType::Person)?.with_first_name("Ken").build();
//! let renamed = Client::from_existing(&ken).with_first_name("Bison").build();
//! assert_eq!(ken.first_name(), Some("Ken"));
//! assert_eq!(renamed.first_name(), Some("Bison"));
//! # Ok::<(), clientservice_core::Error>(())
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::{
  Address, Error, ObjectId, Result,
  enums::{ClientType, Gender, MaritalStatus, PhoneType},
};

// ─── Client ──────────────────────────────────────────────────────────────────

/// A person or company known to the service.
///
/// When [`client_type`](Self::client_type) is [`ClientType::Company`] the
/// company name lives in `last_name`, and `first_name`, `gender`,
/// `birth_date` and `marital_status` are not relevant. This is a convention;
/// nothing rejects those fields on a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Client {
  /// Absent until the client has been stored.
  #[serde(skip_serializing_if = "Option::is_none")]
  id:             Option<ObjectId>,
  #[serde(skip_serializing_if = "Option::is_none")]
  first_name:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  last_name:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  gender:         Option<Gender>,
  #[serde(skip_serializing_if = "Option::is_none")]
  birth_date:     Option<NaiveDate>,
  #[serde(skip_serializing_if = "Option::is_none")]
  marital_status: Option<MaritalStatus>,
  #[serde(skip_serializing_if = "Option::is_none")]
  address:        Option<Address>,
  /// At most one number per phone type.
  #[serde(skip_serializing_if = "BTreeMap::is_empty")]
  phones:         BTreeMap<PhoneType, String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  email:          Option<String>,
  client_type:    ClientType,
}

impl Client {
  /// Start building a client of the given type.
  ///
  /// This is the only way to obtain a [`ClientBuilder`] from scratch, and the
  /// one place the discriminator is checked: `None` fails with
  /// [`Error::ClientTypeRequired`].
  pub fn of_type(client_type: impl Into<Option<ClientType>>) -> Result<ClientBuilder> {
    let client_type = client_type.into().ok_or(Error::ClientTypeRequired)?;
    Ok(ClientBuilder {
      id: None,
      first_name: None,
      last_name: None,
      gender: None,
      birth_date: None,
      marital_status: None,
      address: None,
      phones: BTreeMap::new(),
      email: None,
      client_type,
    })
  }

  /// A builder holding a copy of every field of `client`, identifier
  /// included. Changes made through the builder never reach `client`.
  pub fn from_existing(client: &Client) -> ClientBuilder { ClientBuilder::from(client) }

  pub fn id(&self) -> Option<ObjectId> { self.id }

  pub fn first_name(&self) -> Option<&str> { self.first_name.as_deref() }

  pub fn last_name(&self) -> Option<&str> { self.last_name.as_deref() }

  pub fn gender(&self) -> Option<Gender> { self.gender }

  pub fn birth_date(&self) -> Option<NaiveDate> { self.birth_date }

  pub fn marital_status(&self) -> Option<MaritalStatus> { self.marital_status }

  pub fn address(&self) -> Option<&Address> { self.address.as_ref() }

  /// Read-only view of the phone map.
  pub fn phones(&self) -> &BTreeMap<PhoneType, String> { &self.phones }

  pub fn phone(&self, phone_type: PhoneType) -> Option<&str> {
    self.phones.get(&phone_type).map(String::as_str)
  }

  pub fn email(&self) -> Option<&str> { self.email.as_deref() }

  pub fn client_type(&self) -> ClientType { self.client_type }
}

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Fluent builder for [`Client`]. Setters never fail and perform no
/// cross-field validation.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
  id:             Option<ObjectId>,
  first_name:     Option<String>,
  last_name:      Option<String>,
  gender:         Option<Gender>,
  birth_date:     Option<NaiveDate>,
  marital_status: Option<MaritalStatus>,
  address:        Option<Address>,
  phones:         BTreeMap<PhoneType, String>,
  email:          Option<String>,
  client_type:    ClientType,
}

impl ClientBuilder {
  pub fn with_id(mut self, id: ObjectId) -> Self {
    self.id = Some(id);
    self
  }

  pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
    self.first_name = Some(first_name.into());
    self
  }

  pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
    self.last_name = Some(last_name.into());
    self
  }

  pub fn with_gender(mut self, gender: Gender) -> Self {
    self.gender = Some(gender);
    self
  }

  pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
    self.birth_date = Some(birth_date);
    self
  }

  pub fn with_marital_status(mut self, marital_status: MaritalStatus) -> Self {
    self.marital_status = Some(marital_status);
    self
  }

  pub fn with_address(mut self, address: Address) -> Self {
    self.address = Some(address);
    self
  }

  /// Set the number for `phone_type`. A later call for the same type
  /// replaces the earlier number.
  pub fn with_phone(mut self, phone_type: PhoneType, number: impl Into<String>) -> Self {
    self.phones.insert(phone_type, number.into());
    self
  }

  pub fn with_email(mut self, email: impl Into<String>) -> Self {
    self.email = Some(email.into());
    self
  }

  pub fn build(self) -> Client {
    Client {
      id:             self.id,
      first_name:     self.first_name,
      last_name:      self.last_name,
      gender:         self.gender,
      birth_date:     self.birth_date,
      marital_status: self.marital_status,
      address:        self.address,
      phones:         self.phones,
      email:          self.email,
      client_type:    self.client_type,
    }
  }
}

impl From<&Client> for ClientBuilder {
  fn from(client: &Client) -> Self {
    Self {
      id:             client.id,
      first_name:     client.first_name.clone(),
      last_name:      client.last_name.clone(),
      gender:         client.gender,
      birth_date:     client.birth_date,
      marital_status: client.marital_status,
      address:        client.address.clone(),
      phones:         client.phones.clone(),
      email:          client.email.clone(),
      client_type:    client.client_type,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn shadaloo() -> Address {
    Address::of_country(Some("Shadaloo"))
      .unwrap()
      .with_street_number(110)
      .with_street_name("Bison street")
      .with_city("Shadaloo City")
      .with_zipcode("123456")
      .build()
  }

  fn acme() -> Client {
    Client::of_type(ClientType::Company)
      .unwrap()
      .with_last_name("Acme Corp.")
      .with_address(shadaloo())
      .with_phone(PhoneType::Home, "111111111")
      .with_phone(PhoneType::Cellular, "222222222")
      .with_phone(PhoneType::Office, "333333333 Ext123")
      .with_phone(PhoneType::Fax, "444444444")
      .with_email("kmasters@streetf.com")
      .build()
  }

  #[test]
  fn builds_a_person() {
    let client = Client::of_type(ClientType::Person)
      .unwrap()
      .with_first_name("Ken")
      .with_last_name("Masters")
      .with_gender(Gender::Male)
      .with_birth_date(NaiveDate::from_ymd_opt(1990, 3, 16).unwrap())
      .with_marital_status(MaritalStatus::Single)
      .with_address(shadaloo())
      .with_phone(PhoneType::Home, "111111111")
      .with_phone(PhoneType::Fax, "444444444")
      .with_email("kmasters@streetf.com")
      .build();

    assert_eq!(client.client_type(), ClientType::Person);
    assert_eq!(client.id(), None);
    assert_eq!(client.first_name(), Some("Ken"));
    assert_eq!(client.last_name(), Some("Masters"));
    assert_eq!(client.gender(), Some(Gender::Male));
    assert_eq!(client.birth_date(), NaiveDate::from_ymd_opt(1990, 3, 16));
    assert_eq!(client.marital_status(), Some(MaritalStatus::Single));
    assert_eq!(client.address().and_then(Address::zipcode), Some("123456"));
    assert_eq!(client.phone(PhoneType::Home), Some("111111111"));
    assert_eq!(client.phone(PhoneType::Fax), Some("444444444"));
    assert_eq!(client.phones().len(), 2);
    assert_eq!(client.email(), Some("kmasters@streetf.com"));
  }

  #[test]
  fn builds_a_company_without_person_fields() {
    let client = acme();
    assert_eq!(client.client_type(), ClientType::Company);
    assert_eq!(client.last_name(), Some("Acme Corp."));
    assert_eq!(client.first_name(), None);
    assert_eq!(client.gender(), None);
    assert_eq!(client.birth_date(), None);
    assert_eq!(client.marital_status(), None);
    assert_eq!(client.phones().len(), 4);
  }

  #[test]
  fn missing_type_fails() {
    let err = Client::of_type(None::<ClientType>).unwrap_err();
    assert!(matches!(err, Error::ClientTypeRequired));
    assert_eq!(err.to_string(), "Client type can not be null.");
  }

  #[test]
  fn built_type_matches_requested_type() {
    for t in [ClientType::Person, ClientType::Company] {
      assert_eq!(Client::of_type(t).unwrap().build().client_type(), t);
    }
  }

  #[test]
  fn last_phone_for_a_type_wins() {
    let client = Client::of_type(ClientType::Person)
      .unwrap()
      .with_phone(PhoneType::Home, "111")
      .with_phone(PhoneType::Home, "222")
      .build();

    assert_eq!(client.phones().len(), 1);
    assert_eq!(client.phone(PhoneType::Home), Some("222"));
  }

  #[test]
  fn update_copies_every_other_field() {
    let id = ObjectId::new();
    let original = Client::from_existing(&acme()).with_id(id).build();

    let updated = Client::from_existing(&original).with_last_name("Acme Inc.").build();

    assert_eq!(updated.id(), Some(id));
    assert_eq!(updated.client_type(), ClientType::Company);
    assert_eq!(updated.last_name(), Some("Acme Inc."));
    assert_eq!(updated.address(), original.address());
    assert_eq!(updated.phones(), original.phones());
    assert_eq!(updated.email(), original.email());
  }

  #[test]
  fn copy_is_isolated_from_original() {
    let original = acme();
    let before = original.clone();

    let copy = Client::from_existing(&original)
      .with_first_name("X")
      .with_phone(PhoneType::Home, "999")
      .with_phone(PhoneType::Office, "000")
      .build();

    assert_eq!(original, before);
    assert_eq!(original.phone(PhoneType::Home), Some("111111111"));
    assert_eq!(copy.phone(PhoneType::Home), Some("999"));
    assert_eq!(copy.first_name(), Some("X"));
  }
}
