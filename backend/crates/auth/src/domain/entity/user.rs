//! User Entity
//!
//! A registered account. The password is only ever held as a hash.

use kernel::id::UserId;

use crate::domain::value_object::{
    email::Email, user_name::UserName, user_password::UserPassword,
};

/// Stored user
#[derive(Debug, Clone)]
pub struct User {
    /// Rowid assigned by the store
    pub id: UserId,
    /// Display name (unique)
    pub name: UserName,
    /// Login identity (unique, normalized)
    pub email: Email,
    pub password_hash: UserPassword,
}

/// User about to be inserted; the store assigns the id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: UserName,
    pub email: Email,
    pub password_hash: UserPassword,
}

impl NewUser {
    pub fn new(name: UserName, email: Email, password_hash: UserPassword) -> Self {
        Self {
            name,
            email,
            password_hash,
        }
    }

    /// Attach the id returned by the insert
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
        }
    }
}
