//! Host type and object namespace
//!
//! The console core never owns game objects. It sees the host's types,
//! live objects and methods only through [`HostNamespace`], which the
//! dispatcher receives by `&mut` on every call.
//!
//! [`ObjectHost`] is the stock implementation: types and their methods are
//! registered explicitly at startup, and live objects are kept in a store
//! owned by the host value itself.

mod object_host;

pub use object_host::{HostBuilder, MethodFn, ObjectHost, TypeDef};

/// Opaque handle to a registered host type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeHandle(pub(crate) usize);

/// Identifier of a live object in the host's object store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub(crate) usize);

impl ObjectId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// How instances of a type are obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// Managed by the host's object lifecycle; one instance is found or created
    LiveComponent,
    /// Plain value/service type; built with its zero-argument constructor per call
    Plain,
}

/// A callable method as enumerated by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodHandle {
    /// Type declaring the method
    pub type_handle: TypeHandle,
    /// Position in the type's method enumeration order
    pub index: usize,
    /// Method name
    pub name: String,
    /// Declared parameter count
    pub param_count: usize,
}

/// The receiver of a call
#[derive(Debug)]
pub enum ObjectRef<V> {
    /// A live object stored by the host
    Live(ObjectId),
    /// A freshly constructed plain instance, dropped after the call
    Owned(V),
}

impl<V> ObjectRef<V> {
    pub fn live_id(&self) -> Option<ObjectId> {
        match self {
            Self::Live(id) => Some(*id),
            Self::Owned(_) => None,
        }
    }
}

/// Everything the console core needs from the host application
///
/// Handles are only meaningful to the host that issued them. Passing a
/// [`TypeHandle`] from another host may panic.
pub trait HostNamespace {
    /// Owned plain instance type produced by [`HostNamespace::construct`]
    type Value;

    /// Look up a type by name
    fn lookup_type(&self, name: &str) -> Option<TypeHandle>;

    /// Name the type was registered under
    fn type_name(&self, ty: TypeHandle) -> &str;

    fn type_kind(&self, ty: TypeHandle) -> TypeKind;

    /// Find an existing live object of this type
    fn find_live_instance(&self, ty: TypeHandle) -> Option<ObjectId>;

    /// Create a live object of this type and attach it to the host
    ///
    /// Returns `None` if the type cannot be instantiated.
    fn create_live_instance(&mut self, ty: TypeHandle) -> Option<ObjectId>;

    /// Build a plain instance with its zero-argument constructor
    ///
    /// Returns `None` if the type has no such constructor.
    fn construct(&mut self, ty: TypeHandle) -> Option<Self::Value>;

    /// Public methods of the type, in declaration order
    fn list_methods(&self, ty: TypeHandle) -> Vec<MethodHandle>;

    /// Call `method` on `instance`
    ///
    /// Implementations must reject calls where `args.len()` differs from
    /// `method.param_count`.
    fn call(
        &mut self,
        method: &MethodHandle,
        instance: &mut ObjectRef<Self::Value>,
        args: &[String],
    ) -> anyhow::Result<()>;
}
