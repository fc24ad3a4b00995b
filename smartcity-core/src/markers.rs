//! Map markers of stations.

use std::{fmt, rc::Rc};

use crate::entities::*;

type Action = Rc<dyn Fn(&Id)>;

/// What to do when the edit or delete button of a marker is pressed.
#[derive(Clone)]
pub struct MarkerActions {
    on_edit: Action,
    on_delete: Action,
}

impl MarkerActions {
    pub fn new(on_edit: impl Fn(&Id) + 'static, on_delete: impl Fn(&Id) + 'static) -> Self {
        Self {
            on_edit: Rc::new(on_edit),
            on_delete: Rc::new(on_delete),
        }
    }
}

impl fmt::Debug for MarkerActions {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("MarkerActions").finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone)]
pub struct Marker {
    pub id: Id,
    pub position: Position,
    pub title: String,
    pub subtitle: String,
    actions: MarkerActions,
}

impl Marker {
    pub fn edit(&self) {
        (self.actions.on_edit)(&self.id);
    }

    pub fn delete(&self) {
        (self.actions.on_delete)(&self.id);
    }
}

/// One marker for every station with known coordinates.
pub fn station_markers(stations: &[Station], actions: &MarkerActions) -> Vec<Marker> {
    stations
        .iter()
        .filter_map(|station| {
            let (lat, lng) = station.latitude.zip(station.longitude)?;
            Some(Marker {
                id: station.id.clone(),
                position: Position { lat, lng },
                title: station.name.clone(),
                subtitle: station.kind.to_string(),
                actions: actions.clone(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    fn station(id: &str, latitude: Option<f64>, longitude: Option<f64>) -> Station {
        Station {
            id: id.into(),
            name: format!("Station {id}"),
            kind: StationType::Metro,
            latitude,
            longitude,
        }
    }

    #[test]
    fn skip_stations_without_coordinates() {
        let stations = [
            station("1", Some(36.8), Some(10.18)),
            station("2", None, Some(10.0)),
            station("3", Some(36.9), None),
        ];
        let actions = MarkerActions::new(|_| {}, |_| {});
        let markers = station_markers(&stations, &actions);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].title, "Station 1");
        assert_eq!(markers[0].subtitle, "StationMétro");
        assert_eq!(markers[0].position, Position { lat: 36.8, lng: 10.18 });
    }

    #[test]
    fn actions_receive_the_station_id() {
        let log = Rc::new(RefCell::new(vec![]));
        let actions = {
            let edits = Rc::clone(&log);
            let deletes = Rc::clone(&log);
            MarkerActions::new(
                move |id| edits.borrow_mut().push(format!("edit {id}")),
                move |id| deletes.borrow_mut().push(format!("delete {id}")),
            )
        };
        let stations = [station("a", Some(1.0), Some(2.0)), station("b", Some(3.0), Some(4.0))];
        let markers = station_markers(&stations, &actions);
        markers[1].edit();
        markers[0].delete();
        assert_eq!(*log.borrow(), ["edit b", "delete a"]);
    }
}
