use crate::server::data::catalog::{CatalogNode, CatalogOwner, CatalogRepository};
use sea_orm::{DbErr, EntityTrait, PaginatorTrait};
use test_utils::{
    builder::TestBuilder,
    factory::{self, helpers::create_catalog},
};

mod delete;
