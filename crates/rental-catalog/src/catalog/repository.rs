use super::domain::{Car, CarId, ContactId, ContactInfo, NewCar, NewContactInfo};

/// Storage abstraction for catalog cars so the service can be exercised in isolation.
pub trait CarRepository: Send + Sync {
    fn all(&self) -> Result<Vec<Car>, RepositoryError>;
    fn fetch(&self, id: CarId) -> Result<Option<Car>, RepositoryError>;
    /// Stores a new car; the store assigns the identifier and timestamps.
    fn insert(&self, car: NewCar) -> Result<Car, RepositoryError>;
    fn update(&self, car: Car) -> Result<(), RepositoryError>;
    /// Returns `true` when a record was removed.
    fn delete(&self, id: CarId) -> Result<bool, RepositoryError>;
}

/// Storage abstraction for the business contact details.
pub trait ContactRepository: Send + Sync {
    /// The default contact record: lowest identifier wins.
    fn first(&self) -> Result<Option<ContactInfo>, RepositoryError>;
    fn fetch(&self, id: ContactId) -> Result<Option<ContactInfo>, RepositoryError>;
    fn insert(&self, contact: NewContactInfo) -> Result<ContactInfo, RepositoryError>;
    fn update(&self, contact: ContactInfo) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
