/*!
 * Roles
 * The four thread classes and a fixed table indexed by them
 */

use crate::core::types::Parity;
use serde::{Deserialize, Serialize, Serializer};
use std::ops::{Index, IndexMut};

/// Thread class sharing the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    ProducerEven,
    ProducerOdd,
    ConsumerEven,
    ConsumerOdd,
}

impl Role {
    /// Every role, in wake-selection priority order (highest first)
    pub const PRIORITY: [Role; 4] = [
        Role::ProducerEven,
        Role::ProducerOdd,
        Role::ConsumerEven,
        Role::ConsumerOdd,
    ];

    #[inline(always)]
    pub const fn index(self) -> usize {
        match self {
            Role::ProducerEven => 0,
            Role::ProducerOdd => 1,
            Role::ConsumerEven => 2,
            Role::ConsumerOdd => 3,
        }
    }

    /// Parity of the values this role pushes or pops
    pub const fn parity(self) -> Parity {
        match self {
            Role::ProducerEven | Role::ConsumerEven => Parity::Even,
            Role::ProducerOdd | Role::ConsumerOdd => Parity::Odd,
        }
    }

    pub const fn is_producer(self) -> bool {
        matches!(self, Role::ProducerEven | Role::ProducerOdd)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Role::ProducerEven => "producer-even",
            Role::ProducerOdd => "producer-odd",
            Role::ConsumerEven => "consumer-even",
            Role::ConsumerOdd => "consumer-odd",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One `T` per role
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleTable<T>([T; 4]);

impl<T> RoleTable<T> {
    /// Build a table by calling `f` once per role, in priority order
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(Role) -> T,
    {
        Self(std::array::from_fn(|i| f(Role::PRIORITY[i])))
    }

    /// Entries in priority order
    pub fn iter(&self) -> impl Iterator<Item = (Role, &T)> {
        Role::PRIORITY.into_iter().zip(self.0.iter())
    }

    pub fn map<U, F>(&self, mut f: F) -> RoleTable<U>
    where
        F: FnMut(&T) -> U,
    {
        RoleTable::from_fn(|role| f(&self[role]))
    }
}

impl<T> Index<Role> for RoleTable<T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, role: Role) -> &T {
        &self.0[role.index()]
    }
}

impl<T> IndexMut<Role> for RoleTable<T> {
    #[inline(always)]
    fn index_mut(&mut self, role: Role) -> &mut T {
        &mut self.0[role.index()]
    }
}

/// Serialized as a map keyed by role name
impl<T: Serialize> Serialize for RoleTable<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
