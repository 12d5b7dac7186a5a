//! Minimal provider used by unit tests

use rustc_hash::FxHashMap;

use crate::error::{ReflectError, Result};
use crate::hierarchy::walk;
use crate::provider::{BindingFilter, Member, MemberProvider, ModuleHost, Visibility};

/// Types are indices; type `i` has base `bases[i]`
pub(crate) struct Chain {
    bases: Vec<Option<usize>>,
    names: Vec<String>,
    fields: Vec<Vec<Member<usize>>>,
    properties: Vec<Vec<Member<usize>>>,
    abstract_types: Vec<bool>,
    module_of: Vec<usize>,
    modules: Vec<String>,
    loadable: Vec<bool>,
}

impl Chain {
    /// `n` types where `i` derives from `i + 1`; all live in module "Main"
    pub fn linear(n: usize) -> Self {
        Self {
            bases: (0..n).map(|i| if i + 1 < n { Some(i + 1) } else { None }).collect(),
            names: (0..n).map(|i| format!("Test.T{}", i)).collect(),
            fields: vec![Vec::new(); n],
            properties: vec![Vec::new(); n],
            abstract_types: vec![false; n],
            module_of: vec![0; n],
            modules: vec!["Main".to_string()],
            loadable: vec![true],
        }
    }

    /// `n` unrelated root types
    pub fn roots(n: usize) -> Self {
        let mut chain = Self::linear(n);
        chain.bases = vec![None; n];
        chain
    }

    pub fn with_base(mut self, ty: usize, base: usize) -> Self {
        self.bases[ty] = Some(base);
        self
    }

    pub fn with_field(mut self, ty: usize, mut member: Member<usize>) -> Self {
        member.declaring_type = ty;
        self.fields[ty].push(member);
        self
    }

    pub fn with_property(mut self, ty: usize, mut member: Member<usize>) -> Self {
        member.declaring_type = ty;
        self.properties[ty].push(member);
        self
    }

    pub fn named(mut self, ty: usize, name: &str) -> Self {
        self.names[ty] = name.to_string();
        self
    }

    pub fn with_abstract(mut self, ty: usize) -> Self {
        self.abstract_types[ty] = true;
        self
    }

    /// Add a module; unloadable modules are still listed as loaded
    pub fn with_module(mut self, name: &str, loadable: bool) -> Self {
        self.modules.push(name.to_string());
        self.loadable.push(loadable);
        self
    }

    pub fn in_module(mut self, ty: usize, module: usize) -> Self {
        self.module_of[ty] = module;
        self
    }

    fn single_level(
        &self,
        table: &[Vec<Member<usize>>],
        ty: usize,
        name: &str,
        filter: BindingFilter,
    ) -> Option<Member<usize>> {
        walk(self, ty).enumerate().find_map(|(level, t)| {
            table[t]
                .iter()
                .find(|m| {
                    m.name == name
                        && filter.admits(m.visibility, m.is_static)
                        && (level == 0 || m.visibility == Visibility::Public)
                })
                .cloned()
        })
    }
}

/// Instance of a `Chain` type
#[derive(Debug, Clone, Default)]
pub(crate) struct Obj {
    pub ty: usize,
    slots: FxHashMap<(usize, String), i64>,
}

impl Obj {
    pub fn new(ty: usize) -> Self {
        Self {
            ty,
            slots: FxHashMap::default(),
        }
    }

    pub fn with(mut self, declaring: usize, name: &str, value: i64) -> Self {
        self.slots.insert((declaring, name.to_string()), value);
        self
    }

    pub fn get(&self, declaring: usize, name: &str) -> Option<i64> {
        self.slots.get(&(declaring, name.to_string())).copied()
    }
}

impl MemberProvider for Chain {
    type Type = usize;
    type Instance = Obj;
    type Value = i64;

    fn base_type(&self, ty: &usize) -> Option<usize> {
        self.bases[*ty]
    }

    fn type_name(&self, ty: &usize) -> String {
        self.names[*ty].clone()
    }

    fn declared_fields(&self, ty: &usize, filter: BindingFilter) -> Vec<Member<usize>> {
        self.fields[*ty]
            .iter()
            .filter(|m| filter.admits(m.visibility, m.is_static))
            .cloned()
            .collect()
    }

    fn declared_properties(&self, ty: &usize, filter: BindingFilter) -> Vec<Member<usize>> {
        self.properties[*ty]
            .iter()
            .filter(|m| filter.admits(m.visibility, m.is_static))
            .cloned()
            .collect()
    }

    fn field(&self, ty: &usize, name: &str, filter: BindingFilter) -> Option<Member<usize>> {
        self.single_level(&self.fields, *ty, name, filter)
    }

    fn property(&self, ty: &usize, name: &str, filter: BindingFilter) -> Option<Member<usize>> {
        self.single_level(&self.properties, *ty, name, filter)
    }

    fn type_of(&self, instance: &Obj) -> usize {
        instance.ty
    }

    fn get_value(&self, member: &Member<usize>, instance: &Obj) -> Result<i64> {
        if !member.can_read {
            return Err(ReflectError::NotReadable {
                type_name: self.type_name(&member.declaring_type),
                member: member.name.clone(),
            });
        }
        instance
            .get(member.declaring_type, &member.name)
            .ok_or_else(|| ReflectError::MemberNotFound {
                type_name: self.type_name(&instance.ty),
                member: member.name.clone(),
            })
    }

    fn set_value(&self, member: &Member<usize>, instance: &mut Obj, value: i64) -> Result<()> {
        if !member.can_write {
            return Err(ReflectError::NotWritable {
                type_name: self.type_name(&member.declaring_type),
                member: member.name.clone(),
            });
        }
        instance
            .slots
            .insert((member.declaring_type, member.name.clone()), value);
        Ok(())
    }
}

impl ModuleHost for Chain {
    type Module = usize;

    fn loaded_modules(&self) -> Vec<usize> {
        (0..self.modules.len()).collect()
    }

    fn load_module(&self, name: &str) -> Result<usize> {
        self.modules
            .iter()
            .position(|m| m == name)
            .filter(|&index| self.loadable[index])
            .ok_or_else(|| ReflectError::ModuleLoad {
                module: name.to_string(),
                reason: "not loadable".to_string(),
            })
    }

    fn module_of(&self, ty: &usize) -> usize {
        self.module_of[*ty]
    }

    fn type_in(&self, module: &usize, full_name: &str) -> Option<usize> {
        self.all_types(module)
            .into_iter()
            .find(|&t| self.names[t] == full_name)
    }

    fn all_types(&self, module: &usize) -> Vec<usize> {
        (0..self.bases.len())
            .filter(|&t| self.module_of[t] == *module)
            .collect()
    }

    fn full_name(&self, ty: &usize) -> String {
        self.names[*ty].clone()
    }

    fn is_class(&self, _ty: &usize) -> bool {
        true
    }

    fn is_abstract(&self, ty: &usize) -> bool {
        self.abstract_types[*ty]
    }
}
