//! User-Agent rotation.

use std::fmt;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};

/// Browser User-Agent strings used when none are configured.
pub const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// An ordered pool of User-Agent strings with a pluggable random source.
pub struct UserAgentPool {
    agents: Vec<String>,
    rng: Box<dyn RngCore + Send>,
}

impl UserAgentPool {
    /// Creates a pool holding [`DEFAULT_USER_AGENTS`].
    pub fn new() -> Self {
        let mut pool = Self::empty();
        pool.set_all(DEFAULT_USER_AGENTS.iter().copied());
        pool
    }

    /// Creates a pool with no entries.
    pub fn empty() -> Self {
        Self {
            agents: Vec::new(),
            rng: Box::new(StdRng::from_entropy()),
        }
    }

    /// Replaces the random source, e.g. with a seeded generator in tests.
    pub fn with_rng<R: RngCore + Send + 'static>(mut self, rng: R) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Adds an entry. Blank strings are ignored.
    pub fn add(&mut self, agent: impl AsRef<str>) -> &mut Self {
        let agent = agent.as_ref().trim();
        if !agent.is_empty() {
            self.agents.push(agent.to_string());
        }
        self
    }

    /// Replaces all entries.
    pub fn set_all<I, S>(&mut self, agents: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.agents.clear();
        for agent in agents {
            self.add(agent);
        }
        self
    }

    /// Picks an entry uniformly at random, `None` if the pool is empty.
    pub fn pick_random(&mut self) -> Option<&str> {
        self.agents.choose(&mut *self.rng).map(String::as_str)
    }

    /// Returns the entries in insertion order.
    pub fn agents(&self) -> &[String] {
        &self.agents
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Returns whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl Default for UserAgentPool {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for UserAgentPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserAgentPool")
            .field("agents", &self.agents)
            .finish_non_exhaustive()
    }
}
