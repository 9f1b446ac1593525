//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing account records: creation,
//! lookups by id and email, credential and one-time code updates, and admin queries.

use chrono::Utc;
use entity::sea_orm_active_enums::Role;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    pagination::PageParam,
    user::{CreateUserParam, UpdateProfileParam, User, UserCredentials},
};

/// Repository providing database operations for user management.
pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Database connection or open transaction
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new learner account.
    ///
    /// The account starts unverified with token version 0. When a verification code hash is
    /// given its issue time is set to now.
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(DbErr)` - Insert failed, including unique violations on email or phone number
    pub async fn create(&self, param: CreateUserParam) -> Result<User, DbErr> {
        let now = Utc::now();
        let issued_at = param.verification_code_hash.as_ref().map(|_| now);

        let entity = entity::user::ActiveModel {
            first_name: ActiveValue::Set(param.first_name),
            last_name: ActiveValue::Set(param.last_name),
            email: ActiveValue::Set(param.email),
            phone_number: ActiveValue::Set(param.phone_number),
            registrant_type: ActiveValue::Set(param.registrant_type),
            password_hash: ActiveValue::Set(param.password_hash),
            role: ActiveValue::Set(Role::Learner),
            verified: ActiveValue::Set(false),
            verification_code_hash: ActiveValue::Set(param.verification_code_hash),
            verification_code_issued_at: ActiveValue::Set(issued_at),
            forgot_password_code_hash: ActiveValue::Set(None),
            forgot_password_code_issued_at: ActiveValue::Set(None),
            token_version: ActiveValue::Set(0),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    /// Finds a user by id.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that id
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find_by_id(user_id)
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds a user by their (lowercase) email.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds a user by email together with their stored hashes.
    pub async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await?;

        Ok(entity.map(UserCredentials::from_entity))
    }

    /// Finds a user by id together with their stored hashes.
    pub async fn find_credentials_by_id(
        &self,
        user_id: i32,
    ) -> Result<Option<UserCredentials>, DbErr> {
        let entity = entity::prelude::User::find_by_id(user_id)
            .one(self.db)
            .await?;

        Ok(entity.map(UserCredentials::from_entity))
    }

    /// Gets every user among `user_ids`, in no particular order.
    pub async fn find_by_ids(&self, user_ids: &[i32]) -> Result<Vec<User>, DbErr> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::User::find()
            .filter(entity::user::Column::Id.is_in(user_ids.to_vec()))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(User::from_entity).collect())
    }

    /// Checks whether `email` belongs to a user other than `except`.
    ///
    /// # Arguments
    /// - `email` - Normalized email to look up
    /// - `except` - User id to ignore, for profile updates
    pub async fn email_taken(&self, email: &str, except: Option<i32>) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::User::find().filter(entity::user::Column::Email.eq(email));
        if let Some(user_id) = except {
            query = query.filter(entity::user::Column::Id.ne(user_id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Checks whether `phone_number` belongs to a user other than `except`.
    pub async fn phone_taken(&self, phone_number: &str, except: Option<i32>) -> Result<bool, DbErr> {
        let mut query = entity::prelude::User::find()
            .filter(entity::user::Column::PhoneNumber.eq(phone_number));
        if let Some(user_id) = except {
            query = query.filter(entity::user::Column::Id.ne(user_id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Checks if any admin users exist in the database.
    ///
    /// Used on startup to decide whether an admin claim code is needed.
    ///
    /// # Returns
    /// - `Ok(true)` - At least one admin exists
    /// - `Ok(false)` - No admin exists (first-time setup)
    /// - `Err(DbErr)` - Database error during count query
    pub async fn admin_exists(&self) -> Result<bool, DbErr> {
        let admin_count = entity::prelude::User::find()
            .filter(entity::user::Column::Role.eq(Role::Admin))
            .count(self.db)
            .await?;

        Ok(admin_count > 0)
    }

    /// Sets the role of a user.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - Updated user
    /// - `Ok(None)` - No user with that id
    pub async fn set_role(&self, user_id: i32, role: Role) -> Result<Option<User>, DbErr> {
        self.update_with(user_id, |model| {
            model.role = ActiveValue::Set(role);
        })
        .await
    }

    /// Marks a user verified and clears any outstanding verification code.
    pub async fn mark_verified(&self, user_id: i32) -> Result<Option<User>, DbErr> {
        self.update_with(user_id, |model| {
            model.verified = ActiveValue::Set(true);
            model.verification_code_hash = ActiveValue::Set(None);
            model.verification_code_issued_at = ActiveValue::Set(None);
        })
        .await
    }

    /// Stores a new verification code (or link token) hash issued now.
    pub async fn set_verification_code(
        &self,
        user_id: i32,
        code_hash: String,
    ) -> Result<Option<User>, DbErr> {
        self.update_with(user_id, |model| {
            model.verification_code_hash = ActiveValue::Set(Some(code_hash));
            model.verification_code_issued_at = ActiveValue::Set(Some(Utc::now()));
        })
        .await
    }

    /// Stores a new forgot-password code hash issued now.
    pub async fn set_forgot_password_code(
        &self,
        user_id: i32,
        code_hash: String,
    ) -> Result<Option<User>, DbErr> {
        self.update_with(user_id, |model| {
            model.forgot_password_code_hash = ActiveValue::Set(Some(code_hash));
            model.forgot_password_code_issued_at = ActiveValue::Set(Some(Utc::now()));
        })
        .await
    }

    /// Replaces the password hash, clears any forgot-password code and bumps the token
    /// version so that every previously issued token stops validating.
    pub async fn update_password(
        &self,
        user_id: i32,
        password_hash: String,
    ) -> Result<Option<User>, DbErr> {
        self.bump_with(user_id, |model| {
            model.password_hash = ActiveValue::Set(password_hash);
            model.forgot_password_code_hash = ActiveValue::Set(None);
            model.forgot_password_code_issued_at = ActiveValue::Set(None);
        })
        .await
    }

    /// Bumps the token version, revoking all outstanding tokens (sign out).
    pub async fn bump_token_version(&self, user_id: i32) -> Result<Option<User>, DbErr> {
        self.bump_with(user_id, |_| {}).await
    }

    /// Applies a profile update. Absent fields are left untouched.
    pub async fn update_profile(
        &self,
        user_id: i32,
        param: UpdateProfileParam,
    ) -> Result<Option<User>, DbErr> {
        self.update_with(user_id, |model| {
            if let Some(first_name) = param.first_name {
                model.first_name = ActiveValue::Set(first_name);
            }
            if let Some(last_name) = param.last_name {
                model.last_name = ActiveValue::Set(last_name);
            }
            if let Some(email) = param.email {
                model.email = ActiveValue::Set(email);
            }
            if let Some(phone_number) = param.phone_number {
                model.phone_number = ActiveValue::Set(phone_number);
            }
            if let Some(registrant_type) = param.registrant_type {
                model.registrant_type = ActiveValue::Set(registrant_type);
            }
        })
        .await
    }

    /// Gets users with pagination, newest accounts first.
    ///
    /// # Returns
    /// - `Ok((users, total))` - Users on the requested page and the total user count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_all_paginated(&self, page: PageParam) -> Result<(Vec<User>, u64), DbErr> {
        let paginator = entity::prelude::User::find()
            .order_by_desc(entity::user::Column::CreatedAt)
            .order_by_desc(entity::user::Column::Id)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page.index()).await?;

        Ok((entities.into_iter().map(User::from_entity).collect(), total))
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::User::find().count(self.db).await
    }

    pub async fn count_verified(&self) -> Result<u64, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Verified.eq(true))
            .count(self.db)
            .await
    }

    /// Deletes the user row only. Dependent rows must be removed first.
    pub async fn delete(&self, user_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::User::delete_by_id(user_id)
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Loads the row, applies `change` and saves it with a fresh `updated_at`.
    async fn update_with<F>(&self, user_id: i32, change: F) -> Result<Option<User>, DbErr>
    where
        F: FnOnce(&mut entity::user::ActiveModel),
    {
        let Some(entity) = entity::prelude::User::find_by_id(user_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut model: entity::user::ActiveModel = entity.into();
        change(&mut model);
        model.updated_at = ActiveValue::Set(Utc::now());

        let updated = model.update(self.db).await?;
        Ok(Some(User::from_entity(updated)))
    }

    async fn bump_with<F>(&self, user_id: i32, change: F) -> Result<Option<User>, DbErr>
    where
        F: FnOnce(&mut entity::user::ActiveModel),
    {
        let Some(entity) = entity::prelude::User::find_by_id(user_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let next_version = entity.token_version + 1;
        let mut model: entity::user::ActiveModel = entity.into();
        change(&mut model);
        model.token_version = ActiveValue::Set(next_version);
        model.updated_at = ActiveValue::Set(Utc::now());

        let updated = model.update(self.db).await?;
        Ok(Some(User::from_entity(updated)))
    }
}
