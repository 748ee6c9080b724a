//! Tree deserializer.
//!
//! Wire JSON is first parsed into a [`serde_json::Value`] tree; known field
//! names are then looked up one by one and fed to the matching builder.
//! Unknown fields are ignored, and a field that is explicitly `null` is
//! treated exactly like a missing one. The discriminator of each object is
//! read first so the builder chokepoint rejects incomplete input before any
//! other field is looked at.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::{Map, Value};

use crate::{
  Address, Client, Error, ObjectId, PostalAddress, Result,
  enums::{AddressType, ClientType, Gender, MaritalStatus, PhoneType, Province, State, Symbol},
};

/// Calendar dates on the wire are always `YYYY-MM-DD`.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── Field access ────────────────────────────────────────────────────────────

/// Read-only view over the members of one JSON object.
#[derive(Clone, Copy)]
struct Fields<'a> {
  map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
  fn of(node: &'a Value) -> Result<Self> {
    node.as_object().map(|map| Self { map }).ok_or(Error::NotAnObject)
  }

  fn node(&self, name: &str) -> Option<&'a Value> {
    self.map.get(name).filter(|v| !v.is_null())
  }

  fn text(&self, name: &'static str) -> Result<Option<String>> {
    self.node(name).map(|n| as_text(name, n)).transpose()
  }

  fn symbol<T: Symbol>(&self, name: &'static str) -> Result<Option<T>> {
    self
      .node(name)
      .map(|n| as_text(name, n).and_then(|t| T::from_symbol(&t)))
      .transpose()
  }

  fn date(&self, name: &'static str) -> Result<Option<NaiveDate>> {
    self
      .node(name)
      .map(|n| {
        let text = as_text(name, n)?;
        let date = NaiveDate::parse_from_str(&text, DATE_FORMAT)?;
        // chrono tolerates short fields, signs and inner spaces; only the
        // canonical rendering is accepted.
        if date.format(DATE_FORMAT).to_string() != text {
          return Err(Error::InvalidField {
            field:    name,
            expected: "YYYY-MM-DD date",
          });
        }
        Ok(date)
      })
      .transpose()
  }

  fn int(&self, name: &'static str) -> Result<Option<i64>> {
    self.node(name).map(|n| as_int(name, n)).transpose()
  }

  fn object(&self, name: &'static str) -> Result<Option<Fields<'a>>> {
    self
      .node(name)
      .map(|n| {
        n.as_object().map(|map| Fields { map }).ok_or(Error::InvalidField {
          field:    name,
          expected: "object",
        })
      })
      .transpose()
  }

  fn list(&self, name: &'static str) -> Result<Option<&'a Vec<Value>>> {
    self
      .node(name)
      .map(|n| {
        n.as_array().ok_or(Error::InvalidField {
          field:    name,
          expected: "array",
        })
      })
      .transpose()
  }
}

/// Text view of a scalar node: strings as is, numbers and booleans rendered.
fn as_text(field: &'static str, node: &Value) -> Result<String> {
  match node {
    Value::String(s) => Ok(s.clone()),
    Value::Number(n) => Ok(n.to_string()),
    Value::Bool(b) => Ok(b.to_string()),
    _ => Err(Error::InvalidField {
      field,
      expected: "text",
    }),
  }
}

/// An integer node, or a string holding an integer.
fn as_int(field: &'static str, node: &Value) -> Result<i64> {
  let invalid = || Error::InvalidField {
    field,
    expected: "integer",
  };
  match node {
    Value::Number(n) => n.as_i64().ok_or_else(invalid),
    Value::String(s) => s.trim().parse().map_err(|_| invalid()),
    _ => Err(invalid()),
  }
}

fn narrow<T: TryFrom<i64>>(field: &'static str, value: i64) -> Result<T> {
  T::try_from(value).map_err(|_| Error::InvalidField {
    field,
    expected: "integer in range",
  })
}

// ─── Client ──────────────────────────────────────────────────────────────────

impl Client {
  /// Build a client from a parsed JSON tree.
  pub fn from_tree(tree: &Value) -> Result<Self> {
    let fields = Fields::of(tree)?;

    let client_type: Option<ClientType> = fields.symbol("client_type")?;
    let mut builder = Client::of_type(client_type)?;

    if let Some(id) = fields.text("id")? {
      builder = builder.with_id(id.parse::<ObjectId>()?);
    }
    if let Some(first_name) = fields.text("first_name")? {
      builder = builder.with_first_name(first_name);
    }
    if let Some(last_name) = fields.text("last_name")? {
      builder = builder.with_last_name(last_name);
    }
    if let Some(gender) = fields.symbol::<Gender>("gender")? {
      builder = builder.with_gender(gender);
    }
    if let Some(birth_date) = fields.date("birth_date")? {
      builder = builder.with_birth_date(birth_date);
    }
    if let Some(status) = fields.symbol::<MaritalStatus>("marital_status")? {
      builder = builder.with_marital_status(status);
    }
    if let Some(address) = fields.node("address") {
      builder = builder.with_address(Address::from_tree(address)?);
    }
    if let Some(phones) = fields.object("phones")? {
      for (name, number) in phones.map {
        if number.is_null() {
          continue;
        }
        let phone_type = PhoneType::from_symbol(name)?;
        builder = builder.with_phone(phone_type, as_text("phones", number)?);
      }
    }
    if let Some(email) = fields.text("email")? {
      builder = builder.with_email(email);
    }

    Ok(builder.build())
  }
}

// ─── Address ─────────────────────────────────────────────────────────────────

impl Address {
  /// Build an address from a parsed JSON tree. A missing `country` fails.
  pub fn from_tree(tree: &Value) -> Result<Self> {
    let fields = Fields::of(tree).map_err(|_| Error::InvalidField {
      field:    "address",
      expected: "object",
    })?;

    let mut builder = Address::of_country(fields.text("country")?)?;

    if let Some(n) = fields.int("street_number")? {
      builder = builder.with_street_number(narrow("street_number", n)?);
    }
    if let Some(street_name) = fields.text("street_name")? {
      builder = builder.with_street_name(street_name);
    }
    if let Some(city) = fields.text("city")? {
      builder = builder.with_city(city);
    }
    if let Some(zipcode) = fields.text("zipcode")? {
      builder = builder.with_zipcode(zipcode);
    }
    if let Some(s) = fields.text("state_or_province")? {
      builder = builder.with_state_or_province(s);
    }

    Ok(builder.build())
  }
}

// ─── PostalAddress ───────────────────────────────────────────────────────────

impl PostalAddress {
  /// Build a postal address from a parsed JSON tree, selecting the shape by
  /// its `address_type`. Fields that belong to other shapes are ignored.
  pub fn from_tree(tree: &Value) -> Result<Self> {
    let fields = Fields::of(tree)?;

    let address_type: AddressType = fields
      .symbol("address_type")?
      .ok_or(Error::AddressTypeRequired)?;

    let address = match address_type {
      AddressType::Canada => {
        let mut b = PostalAddress::canada();
        if let Some(n) = fields.int("street_number")? {
          b = b.street_number(narrow("street_number", n)?);
        }
        if let Some(s) = fields.text("street_name")? {
          b = b.street_name(s);
        }
        if let Some(c) = fields.text("city")? {
          b = b.city(c);
        }
        if let Some(p) = fields.symbol::<Province>("province")? {
          b = b.province(p);
        }
        if let Some(z) = fields.text("postal_code")? {
          b = b.postal_code(z);
        }
        b.build()
      }
      AddressType::Usa => {
        let mut b = PostalAddress::usa();
        if let Some(l) = fields.text("address_line")? {
          b = b.address_line(l);
        }
        if let Some(c) = fields.text("city")? {
          b = b.city(c);
        }
        if let Some(s) = fields.symbol::<State>("state")? {
          b = b.state(s);
        }
        if let Some(z) = fields.int("zip_code")? {
          b = b.zip_code(narrow("zip_code", z)?);
        }
        b.build()
      }
      AddressType::Others => {
        let mut b = PostalAddress::others();
        for line in fields.list("lines")?.into_iter().flatten() {
          b = b.with_line(as_text("lines", line)?);
        }
        if let Some(c) = fields.text("country")? {
          b = b.country(c);
        }
        b.build()
      }
    };
    Ok(address)
  }
}

// ─── serde integration ───────────────────────────────────────────────────────

impl<'de> Deserialize<'de> for Client {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let tree = Value::deserialize(deserializer)?;
    Client::from_tree(&tree).map_err(D::Error::custom)
  }
}

impl<'de> Deserialize<'de> for Address {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let tree = Value::deserialize(deserializer)?;
    Address::from_tree(&tree).map_err(D::Error::custom)
  }
}

impl<'de> Deserialize<'de> for PostalAddress {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let tree = Value::deserialize(deserializer)?;
    PostalAddress::from_tree(&tree).map_err(D::Error::custom)
  }
}
