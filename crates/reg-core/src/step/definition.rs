use crate::form::FormData;
use crate::validate::FieldIssue;

/// Trait que define un step del wizard. Las implementaciones deben ser puras
/// respecto a `FormData`: la validez se evalúa en cada intento de transición
/// y nunca se cachea.
pub trait StepDefinition: Send + Sync {
    /// Posición 1-based dentro del wizard (contigua desde 1).
    fn index(&self) -> usize;

    /// Identificador estable y único dentro del wizard.
    fn id(&self) -> &str;

    /// Título amigable (por defecto usa el id).
    fn title(&self) -> &str {
        self.id()
    }

    /// Campos que pertenecen a este step.
    fn fields(&self) -> Vec<&str>;

    /// Problemas de los campos del step sobre el estado actual del formulario.
    fn validate(&self, form: &FormData) -> Vec<FieldIssue>;

    fn is_valid(&self, form: &FormData) -> bool {
        self.validate(form).is_empty()
    }
}
