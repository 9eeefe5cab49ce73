use crate::model::Page;

/// Collection reads served by the account actor.
#[derive(Debug, Clone)]
pub enum AccountQuery {
    /// Every account, in id order, paged.
    List(Page),
}
