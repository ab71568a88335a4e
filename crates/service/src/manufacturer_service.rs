use models::Manufacturer;

use crate::entity_service::EntityService;

pub type ManufacturerService<R> = EntityService<Manufacturer, R>;
