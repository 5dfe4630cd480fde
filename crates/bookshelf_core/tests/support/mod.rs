//! Shared fixtures: one in-memory database per test, for either family.

#![allow(dead_code)]

use bookshelf_core::db::{open_db_in_memory, open_mapper_db_in_memory};
use bookshelf_core::{
    BookStore, MapperBookStore, MapperSession, MapperUserStore, SqlBookStore, SqlUserStore,
    StoreBackend, UserDataFacade, UserStore,
};
use rusqlite::Connection;

pub type DynFacade<'a> = UserDataFacade<Box<dyn UserStore + 'a>, Box<dyn BookStore + 'a>>;

pub enum TestDb {
    Sql(Connection),
    Mapper(MapperSession),
}

impl TestDb {
    pub fn open(backend: StoreBackend) -> Self {
        match backend {
            StoreBackend::Sql => Self::Sql(open_db_in_memory().unwrap()),
            StoreBackend::Mapper => Self::Mapper(open_mapper_db_in_memory().unwrap()),
        }
    }

    pub fn users(&self) -> Box<dyn UserStore + '_> {
        match self {
            Self::Sql(conn) => Box::new(SqlUserStore::new(conn)),
            Self::Mapper(session) => Box::new(MapperUserStore::new(session)),
        }
    }

    pub fn books(&self) -> Box<dyn BookStore + '_> {
        match self {
            Self::Sql(conn) => Box::new(SqlBookStore::new(conn)),
            Self::Mapper(session) => Box::new(MapperBookStore::new(session)),
        }
    }

    pub fn facade(&self) -> DynFacade<'_> {
        UserDataFacade::new(self.users(), self.books())
    }
}
