//! Cancellation tokens carried by every issued request.
//!
//! The host runtime delivers web responses as events that carry back an opaque
//! string map supplied when the request was issued. A token is encoded into
//! that map so the response can be routed to the query instance that issued it
//! and compared against that instance's current token.

use std::collections::BTreeMap;
use std::fmt;

const CHANNEL_KEY: &str = "query";
const GENERATION_KEY: &str = "token";

/// Identifies which query instance a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Title search driven by the search box.
    Search,
    /// Detail lookup driven by the selected title.
    Detail,
}

impl Channel {
    /// Stable wire name used in request context maps.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Detail => "detail",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "search" => Some(Self::Search),
            "detail" => Some(Self::Detail),
            _ => None,
        }
    }
}

/// Marks one issued request.
///
/// Generations increase monotonically per query instance, so two tokens are
/// equal only if they name the very same request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CancellationToken {
    pub channel: Channel,
    pub generation: u64,
}

impl CancellationToken {
    #[must_use]
    pub const fn new(channel: Channel, generation: u64) -> Self {
        Self { channel, generation }
    }

    /// Encodes the token into a request context map.
    ///
    /// # Examples
    ///
    /// ```
    /// use movielist::query::{CancellationToken, Channel};
    ///
    /// let token = CancellationToken::new(Channel::Search, 7);
    /// let context = token.to_context();
    /// assert_eq!(CancellationToken::from_context(&context), Some(token));
    /// ```
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(CHANNEL_KEY.to_string(), self.channel.as_str().to_string());
        context.insert(GENERATION_KEY.to_string(), self.generation.to_string());
        context
    }

    /// Recovers a token from a response context map.
    ///
    /// Returns `None` for maps that were not produced by [`Self::to_context`],
    /// e.g. responses to requests issued by something else.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        let channel = context.get(CHANNEL_KEY).and_then(|c| Channel::parse(c))?;
        let generation = context.get(GENERATION_KEY)?.parse().ok()?;
        Some(Self { channel, generation })
    }
}

impl fmt::Display for CancellationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.channel.as_str(), self.generation)
    }
}
