//! Class symbols.

use bitflags::bitflags;
use kiln_ir::{ClassId, Name};

/// Inheritance modality of a class.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Modality {
    Final,
    Open,
    Abstract,
    /// Subclasses restricted to the declaring package and module.
    Sealed,
}

/// Where a class was declared.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Origin {
    /// Declared in the language being compiled.
    Native,
    /// Declared in foreign (platform) code.
    Foreign,
}

bitflags! {
    /// Declaration properties that do not fit `Modality` or `Origin`.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ClassFlags: u8 {
        /// Declared inside a function body or other local scope.
        const LOCAL = 1 << 0;
        /// Inline (value) class: represented by its underlying value after
        /// lowering.
        const INLINE = 1 << 1;
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ClassSymbol {
    /// Fully qualified, e.g. `kotlin.text.StringBuilder`.
    pub qualified_name: Name,
    pub package: Name,
    pub module: Name,
    pub modality: Modality,
    pub origin: Origin,
    pub flags: ClassFlags,
    pub supertypes: Vec<ClassId>,
}

impl ClassSymbol {
    /// A final, native, non-local class with no supertypes.
    pub fn new(qualified_name: Name, package: Name, module: Name) -> Self {
        ClassSymbol {
            qualified_name,
            package,
            module,
            modality: Modality::Final,
            origin: Origin::Native,
            flags: ClassFlags::empty(),
            supertypes: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_modality(mut self, modality: Modality) -> Self {
        self.modality = modality;
        self
    }

    #[must_use]
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: ClassFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[must_use]
    pub fn with_supertype(mut self, supertype: ClassId) -> Self {
        self.supertypes.push(supertype);
        self
    }

    #[inline]
    pub fn is_sealed(&self) -> bool {
        self.modality == Modality::Sealed
    }

    #[inline]
    pub fn is_local(&self) -> bool {
        self.flags.contains(ClassFlags::LOCAL)
    }

    #[inline]
    pub fn is_inline(&self) -> bool {
        self.flags.contains(ClassFlags::INLINE)
    }

    #[inline]
    pub fn is_foreign(&self) -> bool {
        self.origin == Origin::Foreign
    }
}
