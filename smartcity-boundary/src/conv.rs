use super::*;
use smartcity_entities as e;

// Parsing never fails in practice: unknown type names
// end up in the `Other` variant of each type enum.
fn parse_kind<T>(kind: &str) -> T
where
    T: std::str::FromStr + Default,
{
    kind.parse().unwrap_or_default()
}

impl From<User> for e::user::User {
    fn from(from: User) -> Self {
        let User {
            id,
            name,
            age,
            email,
            kind,
            subscription_card,
        } = from;
        Self {
            id: id.into(),
            name,
            age,
            email,
            kind: parse_kind(&kind),
            subscription_card,
        }
    }
}

impl From<e::user::UserPayload> for UserPayload {
    fn from(from: e::user::UserPayload) -> Self {
        let e::user::UserPayload {
            name,
            age,
            email,
            kind,
            subscription_card,
        } = from;
        Self {
            name,
            age,
            email,
            kind: kind.to_string(),
            subscription_card,
        }
    }
}

impl From<Transport> for e::transport::Transport {
    fn from(from: Transport) -> Self {
        let Transport {
            id,
            name,
            kind,
            capacity,
            registration,
            max_speed,
            electric,
            image_url,
        } = from;
        Self {
            id: id.into(),
            name,
            kind: parse_kind(&kind),
            capacity,
            registration,
            max_speed,
            electric,
            image_url,
        }
    }
}

impl From<e::transport::TransportPayload> for TransportPayload {
    fn from(from: e::transport::TransportPayload) -> Self {
        let e::transport::TransportPayload {
            name,
            kind,
            capacity,
            registration,
            max_speed,
            electric,
            image_url,
        } = from;
        Self {
            name,
            kind: kind.to_string(),
            capacity,
            registration,
            max_speed,
            electric,
            image_url,
        }
    }
}

impl From<Station> for e::station::Station {
    fn from(from: Station) -> Self {
        let Station {
            id,
            name,
            kind,
            latitude,
            longitude,
        } = from;
        Self {
            id: id.into(),
            name,
            kind: parse_kind(&kind),
            latitude,
            longitude,
        }
    }
}

impl From<e::station::StationPayload> for StationPayload {
    fn from(from: e::station::StationPayload) -> Self {
        let e::station::StationPayload {
            name,
            kind,
            latitude,
            longitude,
        } = from;
        Self {
            name,
            kind: kind.to_string(),
            latitude,
            longitude,
        }
    }
}

impl From<Event> for e::event::Event {
    fn from(from: Event) -> Self {
        let Event {
            id,
            name,
            kind,
            description,
            severity,
            date,
            image_url,
        } = from;
        Self {
            id: id.into(),
            name,
            kind: parse_kind(&kind),
            description,
            severity,
            date,
            image_url,
        }
    }
}

impl From<e::event::EventPayload> for EventPayload {
    fn from(from: e::event::EventPayload) -> Self {
        let e::event::EventPayload {
            name,
            kind,
            description,
            severity,
            date,
            image_url,
        } = from;
        Self {
            name,
            kind: kind.to_string(),
            description,
            severity,
            date,
            image_url,
        }
    }
}

impl From<Zone> for e::zone::Zone {
    fn from(from: Zone) -> Self {
        let Zone {
            id,
            name,
            kind,
            area,
            population,
            description,
        } = from;
        Self {
            id: id.into(),
            name,
            kind: parse_kind(&kind),
            area,
            population,
            description,
        }
    }
}

impl From<e::zone::ZonePayload> for ZonePayload {
    fn from(from: e::zone::ZonePayload) -> Self {
        let e::zone::ZonePayload {
            name,
            kind,
            area,
            population,
            description,
        } = from;
        Self {
            name,
            kind: kind.to_string(),
            area,
            population,
            description,
        }
    }
}

impl From<Stats> for e::stats::Stats {
    fn from(from: Stats) -> Self {
        let Stats {
            total_users,
            total_transports,
            total_stations,
            total_events,
            total_zones,
            total_trajets,
        } = from;
        Self {
            users: total_users,
            transports: total_transports,
            stations: total_stations,
            events: total_events,
            zones: total_zones,
            trips: total_trajets,
        }
    }
}

impl From<e::session::Credentials> for Credentials {
    fn from(from: e::session::Credentials) -> Self {
        let e::session::Credentials { email, password } = from;
        Self { email, password }
    }
}

impl From<SessionUser> for e::session::SessionUser {
    fn from(from: SessionUser) -> Self {
        let SessionUser { email, name, role } = from;
        Self { email, name, role }
    }
}

impl From<e::session::SessionUser> for SessionUser {
    fn from(from: e::session::SessionUser) -> Self {
        let e::session::SessionUser { email, name, role } = from;
        Self { email, name, role }
    }
}

impl From<Session> for e::session::Session {
    fn from(from: Session) -> Self {
        let Session {
            user,
            profile_image,
        } = from;
        Self {
            user: user.into(),
            profile_image,
        }
    }
}

impl From<e::session::Session> for Session {
    fn from(from: e::session::Session) -> Self {
        let e::session::Session {
            user,
            profile_image,
        } = from;
        Self {
            user: user.into(),
            profile_image,
        }
    }
}

impl From<NaturalQueryResponse> for e::assistant::Answer {
    fn from(from: NaturalQueryResponse) -> Self {
        let NaturalQueryResponse {
            question,
            generated_query,
            results,
            explanation,
            ..
        } = from;
        Self {
            question,
            generated_query,
            rows: results,
            explanation,
        }
    }
}
