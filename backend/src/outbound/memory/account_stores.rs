//! In-memory account and token stores.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::poisoned;
use crate::domain::ports::{
    AccessTokenRepository, AccessTokenRepositoryError, MAX_TOKENS_PER_USER,
    UserAccountRepository, UserAccountRepositoryError,
};
use crate::domain::{TokenFingerprint, UserAccount, UserId, Username};

/// Account store keyed by username.
#[derive(Debug, Default)]
pub struct InMemoryUserAccountRepository {
    accounts: Mutex<HashMap<Username, UserAccount>>,
}

#[async_trait]
impl UserAccountRepository for InMemoryUserAccountRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserAccountRepositoryError> {
        let mut accounts = self
            .accounts
            .lock()
            .map_err(poisoned("account store"))
            .map_err(UserAccountRepositoryError::query)?;
        if accounts.contains_key(account.username()) {
            return Err(UserAccountRepositoryError::duplicate_username(
                account.username().as_str(),
            ));
        }
        accounts.insert(account.username().clone(), account.clone());
        Ok(())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<UserAccount>, UserAccountRepositoryError> {
        let accounts = self
            .accounts
            .lock()
            .map_err(poisoned("account store"))
            .map_err(UserAccountRepositoryError::query)?;
        Ok(accounts.get(username).cloned())
    }
}

/// Token store keyed by fingerprint, capped per account.
#[derive(Debug, Default)]
pub struct InMemoryAccessTokenRepository {
    tokens: Mutex<TokenIndex>,
}

#[derive(Debug, Default)]
struct TokenIndex {
    owners: HashMap<TokenFingerprint, UserId>,
    issued: HashMap<UserId, VecDeque<TokenFingerprint>>,
}

impl TokenIndex {
    fn insert(&mut self, fingerprint: TokenFingerprint, user_id: UserId) {
        let issued = self.issued.entry(user_id).or_default();
        issued.push_back(fingerprint.clone());
        while issued.len() > MAX_TOKENS_PER_USER {
            if let Some(evicted) = issued.pop_front() {
                self.owners.remove(&evicted);
            }
        }
        self.owners.insert(fingerprint, user_id);
    }
}

#[async_trait]
impl AccessTokenRepository for InMemoryAccessTokenRepository {
    async fn store(
        &self,
        fingerprint: &TokenFingerprint,
        user_id: &UserId,
        _issued_at: DateTime<Utc>,
    ) -> Result<(), AccessTokenRepositoryError> {
        self.tokens
            .lock()
            .map_err(poisoned("token store"))
            .map_err(AccessTokenRepositoryError::query)?
            .insert(fingerprint.clone(), *user_id);
        Ok(())
    }

    async fn resolve(
        &self,
        fingerprint: &TokenFingerprint,
    ) -> Result<Option<UserId>, AccessTokenRepositoryError> {
        let tokens = self
            .tokens
            .lock()
            .map_err(poisoned("token store"))
            .map_err(AccessTokenRepositoryError::query)?;
        Ok(tokens.owners.get(fingerprint).copied())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{AccessToken, PasswordHash};
    use rstest::rstest;

    fn account(name: &str) -> UserAccount {
        UserAccount::new(
            UserId::random(),
            Username::new(name).expect("valid username"),
            PasswordHash::derive("pw"),
            DateTime::<Utc>::UNIX_EPOCH,
        )
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_usernames_are_rejected() {
        let repo = InMemoryUserAccountRepository::default();
        repo.insert(&account("trader")).await.expect("first insert");
        let err = repo
            .insert(&account("trader"))
            .await
            .expect_err("duplicate");
        assert_eq!(err, UserAccountRepositoryError::duplicate_username("trader"));
    }

    #[rstest]
    #[tokio::test]
    async fn accounts_are_found_by_username() {
        let repo = InMemoryUserAccountRepository::default();
        let stored = account("trader");
        repo.insert(&stored).await.expect("insert");
        let found = repo
            .find_by_username(stored.username())
            .await
            .expect("lookup");
        assert_eq!(found.as_ref().map(UserAccount::id), Some(stored.id()));
    }

    #[rstest]
    #[tokio::test]
    async fn tokens_resolve_to_their_owner() {
        let repo = InMemoryAccessTokenRepository::default();
        let owner = UserId::random();
        let token = AccessToken::generate();
        repo.store(&token.fingerprint(), &owner, Utc::now())
            .await
            .expect("store");

        let resolved = repo.resolve(&token.fingerprint()).await.expect("resolve");
        assert_eq!(resolved, Some(owner));
        let other = repo
            .resolve(&AccessToken::generate().fingerprint())
            .await
            .expect("resolve");
        assert!(other.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn oldest_tokens_are_revoked_past_the_cap() {
        let repo = InMemoryAccessTokenRepository::default();
        let owner = UserId::random();
        let other_owner = UserId::random();
        let other = AccessToken::generate();
        repo.store(&other.fingerprint(), &other_owner, Utc::now())
            .await
            .expect("store");

        let issued: Vec<AccessToken> = (0..=MAX_TOKENS_PER_USER)
            .map(|_| AccessToken::generate())
            .collect();
        for token in &issued {
            repo.store(&token.fingerprint(), &owner, Utc::now())
                .await
                .expect("store");
        }

        let oldest = repo
            .resolve(&issued[0].fingerprint())
            .await
            .expect("resolve");
        assert!(oldest.is_none());
        for token in &issued[1..] {
            let resolved = repo.resolve(&token.fingerprint()).await.expect("resolve");
            assert_eq!(resolved, Some(owner));
        }
        let untouched = repo.resolve(&other.fingerprint()).await.expect("resolve");
        assert_eq!(untouched, Some(other_owner));
    }
}
