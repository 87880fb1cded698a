use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    ProfileSetup,
    Chat,
}

impl Screen {
    pub fn requires_session(self) -> bool {
        matches!(self, Screen::ProfileSetup | Screen::Chat)
    }

    pub fn title(self) -> &'static str {
        match self {
            Screen::Login => "Log in",
            Screen::Register => "Create account",
            Screen::ProfileSetup => "Your learning profile",
            Screen::Chat => "Tutor chat",
        }
    }
}

/// Current screen plus the activation id that tags its requests.
#[derive(Debug)]
pub struct Router {
    current: Screen,
    activation: Uuid,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            current: Screen::Login,
            activation: Uuid::new_v4(),
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn activation(&self) -> Uuid {
        self.activation
    }

    /// Authenticated screens fall back to login without a session.
    pub fn resolve(target: Screen, logged_in: bool) -> Screen {
        if target.requires_session() && !logged_in {
            Screen::Login
        } else {
            target
        }
    }

    /// Switch screens. Returns the activation being torn down.
    pub fn enter(&mut self, screen: Screen) -> Uuid {
        let previous = self.activation;
        log::info!("Navigating {:?} -> {:?}", self.current, screen);
        self.current = screen;
        self.activation = Uuid::new_v4();
        previous
    }
}
