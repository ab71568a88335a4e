use std::fmt::Debug;

/// Storage-assigned numeric identity.
pub type EntityId = i64;

/// Behaviour shared by every record the service layer manages.
///
/// An entity is *persistent* once storage has assigned it an id; nothing on
/// the service side ever calls [`Entity::assign_id`].
pub trait Entity: Clone + Debug + PartialEq + Send + Sync + 'static {
    /// Name used in errors and log fields, e.g. `"driver"`.
    const KIND: &'static str;

    fn id(&self) -> Option<EntityId>;

    /// Storage adapters call this when a record is first written.
    fn assign_id(&mut self, id: EntityId);

    fn is_persistent(&self) -> bool {
        self.id().is_some()
    }
}
