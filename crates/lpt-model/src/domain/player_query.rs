use crate::Server;

const DEFAULT_LIMIT: usize = 20;
const MAX_LIMIT: usize = 100;

/// Query parameters for browsing tracked players with filtering and pagination.
///
/// Pages are 1-based. Results are ordered newest first.
#[derive(Debug, Clone)]
pub struct PlayerQuery {
    pub server: Option<Server>,
    pub page: usize,
    pub limit: usize,
}

/// Result of a paginated player query.
#[derive(Debug, Clone)]
pub struct PlayerPage<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl PlayerQuery {
    pub fn new() -> Self {
        Self {
            server: None,
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_server(mut self, server: Server) -> Self {
        self.server = Some(server);
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.clamp(1, MAX_LIMIT);
        self
    }

    /// Number of items to skip for the current page.
    pub fn offset(&self) -> usize {
        (self.page.max(1) - 1) * self.limit
    }
}

impl Default for PlayerQuery {
    fn default() -> Self {
        Self::new()
    }
}
