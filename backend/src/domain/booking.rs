//! Demo booking model and its validation schema.
//!
//! A booking is the lead record captured by the "book a free demo" form. The
//! [`DemoBookingDraft`] is the validated creation shape; storage adapters turn
//! it into a [`DemoBooking`] by assigning an id and a creation timestamp.
//!
//! Validation is pure and total: every malformed payload yields
//! [`BookingValidationErrors`] listing each violated field, never a panic.
//! Accepted values are stored exactly as submitted; whitespace is never
//! stripped, so a booking reads back byte for byte.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Minimum length of a booking name, in characters.
pub const NAME_MIN: usize = 2;
/// Maximum length of a booking name, in characters.
pub const NAME_MAX: usize = 100;
/// Maximum length of an email address, in characters.
pub const EMAIL_MAX: usize = 254;
/// Minimum length of a phone number, in characters.
pub const PHONE_MIN: usize = 10;
/// Maximum length of the optional learning goal message, in characters.
pub const MESSAGE_MAX: usize = 2000;

/// Submission field a violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingField {
    /// The payload as a whole.
    Body,
    Name,
    Email,
    Phone,
    Grade,
    Message,
}

impl BookingField {
    /// JSON key used for this field in submissions.
    pub fn key(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Grade => "grade",
            Self::Message => "message",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Body => "Request body",
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone number",
            Self::Grade => "Grade",
            Self::Message => "Message",
        }
    }
}

/// What was wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Missing,
    NotString,
    NotObject,
    Empty,
    TooShort { min: usize },
    TooLong { max: usize },
    InvalidFormat,
}

impl Violation {
    fn code(self) -> &'static str {
        match self {
            Self::Missing => "missing_field",
            Self::NotString => "invalid_type",
            Self::NotObject => "invalid_body",
            Self::Empty => "empty",
            Self::TooShort { .. } => "too_short",
            Self::TooLong { .. } => "too_long",
            Self::InvalidFormat => "invalid_format",
        }
    }
}

/// A single field violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingValidationError {
    field: BookingField,
    violation: Violation,
}

impl BookingValidationError {
    /// Build a violation for `field`.
    pub fn new(field: BookingField, violation: Violation) -> Self {
        Self { field, violation }
    }

    /// Field the violation refers to.
    pub fn field(&self) -> BookingField {
        self.field
    }

    /// The violated constraint.
    pub fn violation(&self) -> Violation {
        self.violation
    }

    /// Stable machine-readable violation code.
    pub fn code(&self) -> &'static str {
        self.violation.code()
    }
}

impl fmt::Display for BookingValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BookingField as F;
        use Violation as V;

        let label = self.field.label();
        match (self.field, self.violation) {
            (F::Email, V::InvalidFormat | V::TooLong { .. }) => {
                write!(f, "Please enter a valid email address")
            }
            (F::Grade, V::Empty) => write!(f, "Please select a grade"),
            (_, V::NotObject) => write!(f, "{label} must be a JSON object"),
            (_, V::Missing) => write!(f, "{label} is required"),
            (_, V::NotString) => write!(f, "{label} must be a string"),
            (_, V::Empty) => write!(f, "{label} must not be empty"),
            (_, V::TooShort { min }) => write!(f, "{label} must be at least {min} characters"),
            (_, V::TooLong { max }) => write!(f, "{label} must be at most {max} characters"),
            (_, V::InvalidFormat) => write!(f, "{label} is not in a valid format"),
        }
    }
}

impl std::error::Error for BookingValidationError {}

/// Every violation found in one submission, in field order.
///
/// `Display` joins the individual messages with `"; "` so the result can be
/// shown to an end user as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingValidationErrors(Vec<BookingValidationError>);

impl BookingValidationErrors {
    /// Individual violations.
    pub fn iter(&self) -> impl Iterator<Item = &BookingValidationError> {
        self.0.iter()
    }

    /// Whether a violation was recorded for `field`.
    pub fn contains_field(&self, field: BookingField) -> bool {
        self.0.iter().any(|err| err.field == field)
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false for values produced by validation.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<BookingValidationError> for BookingValidationErrors {
    fn from(value: BookingValidationError) -> Self {
        Self(vec![value])
    }
}

impl fmt::Display for BookingValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for BookingValidationErrors {}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn at_least(field: BookingField, value: &str, min: usize) -> Result<(), BookingValidationError> {
    if char_len(value) < min {
        return Err(BookingValidationError::new(field, Violation::TooShort { min }));
    }
    Ok(())
}

fn at_most(field: BookingField, value: &str, max: usize) -> Result<(), BookingValidationError> {
    if char_len(value) > max {
        return Err(BookingValidationError::new(field, Violation::TooLong { max }));
    }
    Ok(())
}

/// Whitespace-only input counts as empty; the value itself is kept verbatim.
fn not_blank(field: BookingField, value: &str) -> Result<(), BookingValidationError> {
    if value.trim().is_empty() {
        return Err(BookingValidationError::new(field, Violation::Empty));
    }
    Ok(())
}

macro_rules! string_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(String);

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

string_newtype! {
    /// Name of the prospective student or parent.
    PersonName
}

impl PersonName {
    /// Validate and construct a [`PersonName`].
    pub fn new(name: impl Into<String>) -> Result<Self, BookingValidationError> {
        let name = name.into();
        at_least(BookingField::Name, &name, NAME_MIN)?;
        not_blank(BookingField::Name, &name)?;
        at_most(BookingField::Name, &name, NAME_MAX)?;
        Ok(Self(name))
    }
}

string_newtype! {
    /// Syntactically valid contact email address.
    EmailAddress
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(email: impl Into<String>) -> Result<Self, BookingValidationError> {
        let email = email.into();
        if char_len(&email) > EMAIL_MAX {
            return Err(BookingValidationError::new(
                BookingField::Email,
                Violation::TooLong { max: EMAIL_MAX },
            ));
        }
        // The regex crate has no lookaround, so dot placement is checked here.
        let well_formed =
            !email.starts_with('.') && !email.contains("..") && email_regex().is_match(&email);
        if !well_formed {
            return Err(BookingValidationError::new(
                BookingField::Email,
                Violation::InvalidFormat,
            ));
        }
        Ok(Self(email))
    }
}

string_newtype! {
    /// Contact phone number.
    ///
    /// Only a minimum length applies; punctuation, international prefixes and
    /// extensions are all accepted.
    PhoneNumber
}

impl PhoneNumber {
    /// Validate and construct a [`PhoneNumber`].
    pub fn new(phone: impl Into<String>) -> Result<Self, BookingValidationError> {
        let phone = phone.into();
        at_least(BookingField::Phone, &phone, PHONE_MIN)?;
        not_blank(BookingField::Phone, &phone)?;
        Ok(Self(phone))
    }
}

string_newtype! {
    /// Course or grade tier chosen on the form.
    ///
    /// The set of tiers belongs to the presentation layer; any non-empty label
    /// is accepted here.
    GradeTier
}

impl GradeTier {
    /// Validate and construct a [`GradeTier`].
    pub fn new(grade: impl Into<String>) -> Result<Self, BookingValidationError> {
        let grade = grade.into();
        not_blank(BookingField::Grade, &grade)?;
        Ok(Self(grade))
    }
}

string_newtype! {
    /// Free-text learning goal attached to a booking.
    LearningGoal
}

impl LearningGoal {
    /// Validate an optional message.
    ///
    /// `None` (absent or `null`) means no message. Any string, including an
    /// empty one, is kept as given.
    pub fn parse(message: Option<String>) -> Result<Option<Self>, BookingValidationError> {
        message
            .map(|message| {
                at_most(BookingField::Message, &message, MESSAGE_MAX)?;
                Ok(Self(message))
            })
            .transpose()
    }
}

/// Stable booking identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookingId(Uuid);

impl BookingId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier assigned elsewhere, e.g. by the database.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for BookingId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Raw, unvalidated booking fields, e.g. read back from a database row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoBookingFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub grade: String,
    pub message: Option<String>,
}

/// Validated booking submission awaiting persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoBookingDraft {
    name: PersonName,
    email: EmailAddress,
    phone: PhoneNumber,
    grade: GradeTier,
    message: Option<LearningGoal>,
}

fn keep<T>(
    errors: &mut Vec<BookingValidationError>,
    result: Result<T, BookingValidationError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            errors.push(error);
            None
        }
    }
}

fn string_field(
    fields: &Map<String, Value>,
    field: BookingField,
) -> Result<Option<String>, BookingValidationError> {
    match fields.get(field.key()) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(BookingValidationError::new(field, Violation::NotString)),
    }
}

fn required_field(
    fields: &Map<String, Value>,
    field: BookingField,
) -> Result<String, BookingValidationError> {
    string_field(fields, field)?
        .ok_or_else(|| BookingValidationError::new(field, Violation::Missing))
}

impl DemoBookingDraft {
    /// Build a draft from already validated parts.
    pub fn new(
        name: PersonName,
        email: EmailAddress,
        phone: PhoneNumber,
        grade: GradeTier,
        message: Option<LearningGoal>,
    ) -> Self {
        Self {
            name,
            email,
            phone,
            grade,
            message,
        }
    }

    /// Validate an untyped JSON payload against the booking schema.
    ///
    /// Unknown keys are ignored. All violations are collected before
    /// returning.
    ///
    /// # Examples
    /// ```
    /// use bookings::domain::DemoBookingDraft;
    /// use serde_json::json;
    ///
    /// let err = DemoBookingDraft::from_payload(&json!({
    ///     "name": "A",
    ///     "email": "bad-email",
    ///     "phone": "123",
    ///     "grade": "",
    /// }))
    /// .expect_err("payload is invalid");
    /// assert!(err.to_string().starts_with("Name must be at least 2 characters"));
    /// ```
    pub fn from_payload(payload: &Value) -> Result<Self, BookingValidationErrors> {
        let Some(fields) = payload.as_object() else {
            return Err(BookingValidationError::new(BookingField::Body, Violation::NotObject).into());
        };

        let mut errors = Vec::new();
        let name = keep(
            &mut errors,
            required_field(fields, BookingField::Name).and_then(PersonName::new),
        );
        let email = keep(
            &mut errors,
            required_field(fields, BookingField::Email).and_then(EmailAddress::new),
        );
        let phone = keep(
            &mut errors,
            required_field(fields, BookingField::Phone).and_then(PhoneNumber::new),
        );
        let grade = keep(
            &mut errors,
            required_field(fields, BookingField::Grade).and_then(GradeTier::new),
        );
        let message = keep(
            &mut errors,
            string_field(fields, BookingField::Message).and_then(LearningGoal::parse),
        );

        match (name, email, phone, grade, message) {
            (Some(name), Some(email), Some(phone), Some(grade), Some(message))
                if errors.is_empty() =>
            {
                Ok(Self::new(name, email, phone, grade, message))
            }
            _ => Err(BookingValidationErrors(errors)),
        }
    }

    /// Contact name.
    pub fn name(&self) -> &PersonName {
        &self.name
    }

    /// Contact email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Contact phone.
    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }

    /// Selected grade tier.
    pub fn grade(&self) -> &GradeTier {
        &self.grade
    }

    /// Optional learning goal.
    pub fn message(&self) -> Option<&LearningGoal> {
        self.message.as_ref()
    }
}

impl TryFrom<DemoBookingFields> for DemoBookingDraft {
    type Error = BookingValidationErrors;

    fn try_from(value: DemoBookingFields) -> Result<Self, Self::Error> {
        let DemoBookingFields {
            name,
            email,
            phone,
            grade,
            message,
        } = value;

        let mut errors = Vec::new();
        let name = keep(&mut errors, PersonName::new(name));
        let email = keep(&mut errors, EmailAddress::new(email));
        let phone = keep(&mut errors, PhoneNumber::new(phone));
        let grade = keep(&mut errors, GradeTier::new(grade));
        let message = keep(&mut errors, LearningGoal::parse(message));

        match (name, email, phone, grade, message) {
            (Some(name), Some(email), Some(phone), Some(grade), Some(message))
                if errors.is_empty() =>
            {
                Ok(Self::new(name, email, phone, grade, message))
            }
            _ => Err(BookingValidationErrors(errors)),
        }
    }
}

/// A persisted demo booking.
///
/// ## Invariants
/// - Every field satisfied the booking schema at creation time.
/// - `id` and `created_at` are assigned by the storage layer and never change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "DemoBookingDto", into = "DemoBookingDto")]
pub struct DemoBooking {
    id: BookingId,
    draft: DemoBookingDraft,
    created_at: DateTime<Utc>,
}

impl DemoBooking {
    /// Combine a validated draft with storage-assigned metadata.
    pub fn new(id: BookingId, draft: DemoBookingDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            draft,
            created_at,
        }
    }

    /// Storage-assigned identifier.
    pub fn id(&self) -> BookingId {
        self.id
    }

    /// Storage-assigned creation time.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Submitted booking fields.
    pub fn draft(&self) -> &DemoBookingDraft {
        &self.draft
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DemoBookingDto {
    id: Uuid,
    name: String,
    email: String,
    phone: String,
    grade: String,
    message: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<DemoBooking> for DemoBookingDto {
    fn from(value: DemoBooking) -> Self {
        let DemoBooking {
            id,
            draft,
            created_at,
        } = value;
        Self {
            id: *id.as_uuid(),
            name: draft.name.into(),
            email: draft.email.into(),
            phone: draft.phone.into(),
            grade: draft.grade.into(),
            message: draft.message.map(Into::into),
            created_at,
        }
    }
}

impl TryFrom<DemoBookingDto> for DemoBooking {
    type Error = BookingValidationErrors;

    fn try_from(value: DemoBookingDto) -> Result<Self, Self::Error> {
        let DemoBookingDto {
            id,
            name,
            email,
            phone,
            grade,
            message,
            created_at,
        } = value;
        let draft = DemoBookingDraft::try_from(DemoBookingFields {
            name,
            email,
            phone,
            grade,
            message,
        })?;
        Ok(Self::new(BookingId::from_uuid(id), draft, created_at))
    }
}
