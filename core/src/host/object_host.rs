//! Registration-table host
//!
//! Types are declared up front with [`TypeDef`], each method bound to a
//! closure with its parameter count. Live objects are stored in the host
//! and found again by type on later calls.

use std::any::{Any, TypeId};
use std::marker::PhantomData;

use anyhow::{anyhow, bail};
use hashbrown::HashMap;

use super::{HostNamespace, MethodHandle, ObjectId, ObjectRef, TypeHandle, TypeKind};

/// Type-erased method body
pub type MethodFn = Box<dyn Fn(&mut dyn Any, &[String]) -> anyhow::Result<()>>;

type Constructor = Box<dyn Fn() -> Box<dyn Any>>;

struct MethodEntry {
    name: String,
    param_count: usize,
    handler: MethodFn,
}

struct TypeEntry {
    name: String,
    kind: TypeKind,
    rust_type: TypeId,
    constructor: Option<Constructor>,
    methods: Vec<MethodEntry>,
}

struct LiveObject {
    ty: TypeHandle,
    value: Box<dyn Any>,
}

/// Declaration of a host type and its callable methods
pub struct TypeDef<T> {
    name: String,
    kind: TypeKind,
    constructor: Option<Constructor>,
    methods: Vec<MethodEntry>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any> TypeDef<T> {
    /// A live component: at most one instance is created, then reused
    pub fn live_component(name: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            name: name.into(),
            kind: TypeKind::LiveComponent,
            constructor: Some(Box::new(|| Box::new(T::default()) as Box<dyn Any>)),
            methods: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// A plain type without a zero-argument constructor
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Plain,
            constructor: None,
            methods: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Give the type a zero-argument constructor (`T::default()`)
    pub fn with_default_constructor(mut self) -> Self
    where
        T: Default,
    {
        self.constructor = Some(Box::new(|| Box::new(T::default()) as Box<dyn Any>));
        self
    }

    /// Add a method overload
    ///
    /// The handler receives exactly `param_count` arguments; the host rejects
    /// calls with any other count before reaching it. Overloads with
    /// the same name and parameter count are allowed; the first one added wins.
    pub fn method<F>(mut self, name: impl Into<String>, param_count: usize, f: F) -> Self
    where
        F: Fn(&mut T, &[String]) -> anyhow::Result<()> + 'static,
    {
        let rust_name = std::any::type_name::<T>();
        let handler: MethodFn = Box::new(move |receiver: &mut dyn Any, args: &[String]| {
            let target = receiver
                .downcast_mut::<T>()
                .ok_or_else(|| anyhow!("receiver is not a {}", rust_name))?;
            f(target, args)
        });
        self.methods.push(MethodEntry {
            name: name.into(),
            param_count,
            handler,
        });
        self
    }
}

/// Builder collecting type registrations
#[derive(Default)]
pub struct HostBuilder {
    types: Vec<TypeEntry>,
    by_name: HashMap<String, TypeHandle>,
}

impl HostBuilder {
    /// Register a type. A second type with the same name is ignored.
    pub fn register<T: Any>(mut self, def: TypeDef<T>) -> Self {
        if self.by_name.contains_key(&def.name) {
            tracing::warn!("host type '{}' registered twice - ignored", def.name);
            return self;
        }

        let handle = TypeHandle(self.types.len());
        self.by_name.insert(def.name.clone(), handle);
        self.types.push(TypeEntry {
            name: def.name,
            kind: def.kind,
            rust_type: TypeId::of::<T>(),
            constructor: def.constructor,
            methods: def.methods,
        });
        self
    }

    pub fn build(self) -> ObjectHost {
        tracing::debug!("console host built with {} types", self.types.len());
        ObjectHost {
            types: self.types,
            by_name: self.by_name,
            live: Vec::new(),
        }
    }
}

/// Host namespace backed by an explicit type table and an owned object store
///
/// `type_name` and `type_kind` index the type table directly and panic on a
/// [`TypeHandle`] issued by a different host.
pub struct ObjectHost {
    types: Vec<TypeEntry>,
    by_name: HashMap<String, TypeHandle>,
    live: Vec<LiveObject>,
}

impl ObjectHost {
    pub fn builder() -> HostBuilder {
        HostBuilder::default()
    }

    /// Attach an already-built live object (e.g., one placed by scene setup)
    ///
    /// Returns `None` if `T` is not registered as a live component.
    pub fn spawn<T: Any>(&mut self, value: T) -> Option<ObjectId> {
        let rust_type = TypeId::of::<T>();
        let position = self
            .types
            .iter()
            .position(|t| t.rust_type == rust_type && t.kind == TypeKind::LiveComponent);
        let Some(position) = position else {
            tracing::warn!(
                "spawn of unregistered live component {}",
                std::any::type_name::<T>()
            );
            return None;
        };

        Some(self.attach(TypeHandle(position), Box::new(value)))
    }

    /// Borrow a live object
    pub fn get<T: Any>(&self, id: ObjectId) -> Option<&T> {
        self.live.get(id.index())?.value.downcast_ref::<T>()
    }

    /// Number of live objects of the named type
    pub fn live_count(&self, type_name: &str) -> usize {
        match self.by_name.get(type_name) {
            Some(ty) => self.live.iter().filter(|o| o.ty == *ty).count(),
            None => 0,
        }
    }

    /// Number of live objects of all types
    pub fn total_live(&self) -> usize {
        self.live.len()
    }

    /// Registered type names, in registration order
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.types.iter().map(|t| t.name.as_str())
    }

    fn attach(&mut self, ty: TypeHandle, value: Box<dyn Any>) -> ObjectId {
        let id = ObjectId(self.live.len());
        self.live.push(LiveObject { ty, value });
        id
    }
}

impl HostNamespace for ObjectHost {
    type Value = Box<dyn Any>;

    fn lookup_type(&self, name: &str) -> Option<TypeHandle> {
        self.by_name.get(name).copied()
    }

    fn type_name(&self, ty: TypeHandle) -> &str {
        &self.types[ty.0].name
    }

    fn type_kind(&self, ty: TypeHandle) -> TypeKind {
        self.types[ty.0].kind
    }

    fn find_live_instance(&self, ty: TypeHandle) -> Option<ObjectId> {
        self.live
            .iter()
            .position(|o| o.ty == ty)
            .map(ObjectId)
    }

    fn create_live_instance(&mut self, ty: TypeHandle) -> Option<ObjectId> {
        let value = self.types.get(ty.0)?.constructor.as_ref().map(|ctor| ctor())?;
        Some(self.attach(ty, value))
    }

    fn construct(&mut self, ty: TypeHandle) -> Option<Self::Value> {
        self.types.get(ty.0)?.constructor.as_ref().map(|ctor| ctor())
    }

    fn list_methods(&self, ty: TypeHandle) -> Vec<MethodHandle> {
        let Some(entry) = self.types.get(ty.0) else {
            return Vec::new();
        };
        entry
            .methods
            .iter()
            .enumerate()
            .map(|(index, m)| MethodHandle {
                type_handle: ty,
                index,
                name: m.name.clone(),
                param_count: m.param_count,
            })
            .collect()
    }

    fn call(
        &mut self,
        method: &MethodHandle,
        instance: &mut ObjectRef<Self::Value>,
        args: &[String],
    ) -> anyhow::Result<()> {
        let entry = self
            .types
            .get(method.type_handle.0)
            .and_then(|t| t.methods.get(method.index))
            .ok_or_else(|| anyhow!("stale method handle '{}'", method.name))?;
        if args.len() != entry.param_count {
            bail!(
                "{} expects {} argument(s), got {}",
                entry.name,
                entry.param_count,
                args.len()
            );
        }

        let receiver: &mut dyn Any = match instance {
            ObjectRef::Live(id) => self
                .live
                .get_mut(id.index())
                .ok_or_else(|| anyhow!("live object {} does not exist", id.index()))?
                .value
                .as_mut(),
            ObjectRef::Owned(value) => value.as_mut(),
        };

        (entry.handler)(receiver, args)
    }
}
