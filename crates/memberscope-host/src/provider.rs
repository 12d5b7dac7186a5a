//! Provider implementation for [`TypeRegistry`]
//!
//! Single-level `field`/`property` lookups behave like a conventional
//! reflection host: members declared on the queried type are matched under
//! the filter, and ancestors contribute only their public members.

use serde_json::Value;

use memberscope_core::{
    is_subclass_of, walk, BindingFilter, Member, MemberKind, MemberProvider, ModuleHost,
    ReflectError, Result, Visibility,
};

use crate::instance::Instance;
use crate::modules::ModuleId;
use crate::registry::{MemberDef, TypeId, TypeKind, TypeRegistry};

impl TypeRegistry {
    fn declared(&self, ty: TypeId, kind: MemberKind, filter: BindingFilter) -> Vec<Member<TypeId>> {
        self.members_of(ty, kind)
            .iter()
            .filter(|m| filter.admits(m.visibility, m.is_static))
            .map(|m| m.describe(ty, kind))
            .collect()
    }

    fn single_level(
        &self,
        ty: TypeId,
        kind: MemberKind,
        name: &str,
        filter: BindingFilter,
    ) -> Option<Member<TypeId>> {
        walk(self, ty).enumerate().find_map(|(level, current)| {
            self.members_of(current, kind)
                .iter()
                .find(|m| {
                    m.name == name
                        && filter.admits(m.visibility, m.is_static)
                        && (level == 0 || m.visibility == Visibility::Public)
                })
                .map(|m| m.describe(current, kind))
        })
    }

    fn members_of(&self, ty: TypeId, kind: MemberKind) -> &[MemberDef] {
        let def = self.def(ty);
        match kind {
            MemberKind::Field => &def.fields,
            MemberKind::Property => &def.properties,
        }
    }

    fn check_instance(&self, member: &Member<TypeId>, instance: &Instance) -> Result<()> {
        let actual = instance.type_id();
        if actual == member.declaring_type || is_subclass_of(self, &actual, &member.declaring_type)
        {
            return Ok(());
        }
        Err(ReflectError::TypeMismatch {
            expected: self.type_name(&member.declaring_type),
            actual: self.type_name(&actual),
        })
    }

    fn missing(&self, ty: TypeId, member: &Member<TypeId>) -> ReflectError {
        ReflectError::MemberNotFound {
            type_name: self.type_name(&ty),
            member: member.name.clone(),
        }
    }
}

impl MemberProvider for TypeRegistry {
    type Type = TypeId;
    type Instance = Instance;
    type Value = Value;

    fn base_type(&self, ty: &TypeId) -> Option<TypeId> {
        self.def(*ty).base
    }

    fn type_name(&self, ty: &TypeId) -> String {
        self.def(*ty).full_name.clone()
    }

    fn declared_fields(&self, ty: &TypeId, filter: BindingFilter) -> Vec<Member<TypeId>> {
        self.declared(*ty, MemberKind::Field, filter)
    }

    fn declared_properties(&self, ty: &TypeId, filter: BindingFilter) -> Vec<Member<TypeId>> {
        self.declared(*ty, MemberKind::Property, filter)
    }

    fn field(&self, ty: &TypeId, name: &str, filter: BindingFilter) -> Option<Member<TypeId>> {
        self.single_level(*ty, MemberKind::Field, name, filter)
    }

    fn property(&self, ty: &TypeId, name: &str, filter: BindingFilter) -> Option<Member<TypeId>> {
        self.single_level(*ty, MemberKind::Property, name, filter)
    }

    fn type_of(&self, instance: &Instance) -> TypeId {
        instance.type_id()
    }

    fn get_value(&self, member: &Member<TypeId>, instance: &Instance) -> Result<Value> {
        if !member.can_read {
            return Err(ReflectError::NotReadable {
                type_name: self.type_name(&member.declaring_type),
                member: member.name.clone(),
            });
        }

        if member.is_static {
            return self
                .statics()
                .read()
                .get(&(member.declaring_type, member.name.clone()))
                .cloned()
                .ok_or_else(|| self.missing(member.declaring_type, member));
        }

        self.check_instance(member, instance)?;
        instance
            .slot(member.declaring_type, &member.name)
            .cloned()
            .ok_or_else(|| self.missing(instance.type_id(), member))
    }

    fn set_value(
        &self,
        member: &Member<TypeId>,
        instance: &mut Instance,
        value: Value,
    ) -> Result<()> {
        if !member.can_write {
            return Err(ReflectError::NotWritable {
                type_name: self.type_name(&member.declaring_type),
                member: member.name.clone(),
            });
        }

        if member.is_static {
            self.statics()
                .write()
                .insert((member.declaring_type, member.name.clone()), value);
            return Ok(());
        }

        self.check_instance(member, instance)?;
        let ty = instance.type_id();
        let slot = instance
            .slot_mut(member.declaring_type, &member.name)
            .ok_or_else(|| self.missing(ty, member))?;
        *slot = value;
        Ok(())
    }
}

impl ModuleHost for TypeRegistry {
    type Module = ModuleId;

    fn loaded_modules(&self) -> Vec<ModuleId> {
        self.modules().loaded()
    }

    fn load_module(&self, name: &str) -> Result<ModuleId> {
        self.modules().load(name)
    }

    fn module_of(&self, ty: &TypeId) -> ModuleId {
        self.def(*ty).module
    }

    fn type_in(&self, module: &ModuleId, full_name: &str) -> Option<TypeId> {
        self.type_in_module(*module, full_name)
    }

    fn all_types(&self, module: &ModuleId) -> Vec<TypeId> {
        self.types_in_module(*module)
    }

    fn full_name(&self, ty: &TypeId) -> String {
        self.def(*ty).full_name.clone()
    }

    fn is_class(&self, ty: &TypeId) -> bool {
        self.def(*ty).kind == TypeKind::Class
    }

    fn is_abstract(&self, ty: &TypeId) -> bool {
        self.def(*ty).is_abstract
    }
}
