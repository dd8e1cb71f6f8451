//! Static Django integration sources emitted by the setup flow.
//!
//! These are documentation-as-code: fully static text the caller writes to
//! disk for a human to paste into their Django project. Nothing here is
//! executed or templated.

/// File name the model definitions are written to.
pub const MODELS_FILE_NAME: &str = "django_models_example.py";

/// File name the admin integration is written to.
pub const ADMIN_FILE_NAME: &str = "django_admin_example.py";

/// Django model definitions for the client/user pair tracked by the debt
/// collection system.
pub fn django_models_source() -> &'static str {
    DJANGO_MODELS
}

/// Django admin integration with provisioning actions.
pub fn django_admin_source() -> &'static str {
    DJANGO_ADMIN
}

const DJANGO_MODELS: &str = r#"
# Add this to your Django models.py

from django.db import models
from django.contrib.auth.models import AbstractUser

class Client(models.Model):
    """Represents a medical client/organization"""
    client_id = models.CharField(max_length=255, unique=True, help_text="Unique client identifier for debt collection system")
    name = models.CharField(max_length=255)
    contact_email = models.EmailField(blank=True)
    is_active = models.BooleanField(default=True)
    created_at = models.DateTimeField(auto_now_add=True)
    updated_at = models.DateTimeField(auto_now=True)

    class Meta:
        ordering = ['name']

    def __str__(self):
        return f"{self.name} ({self.client_id})"

class User(AbstractUser):
    """Extended user model with client association"""
    client = models.ForeignKey(
        Client,
        on_delete=models.CASCADE,
        related_name='users',
        help_text="Client this user belongs to"
    )
    keycloak_id = models.CharField(
        max_length=255,
        unique=True,
        null=True,
        blank=True,
        help_text="Keycloak user ID for authentication"
    )
    is_provisioned_to_debt_collection = models.BooleanField(
        default=False,
        help_text="Whether user has been synced to debt collection system"
    )
    provisioned_at = models.DateTimeField(null=True, blank=True)

    class Meta:
        ordering = ['client__name', 'username']

    def __str__(self):
        return f"{self.username} - {self.client.name}"

    def get_debt_collection_data(self):
        """Get user data formatted for debt collection API"""
        return {
            'keycloak_id': self.keycloak_id,
            'email': self.email,
            'first_name': self.first_name,
            'last_name': self.last_name,
            'engagemx_client_id': self.client.client_id,
            'is_active': self.is_active
        }
"#;

const DJANGO_ADMIN: &str = r#"
# Add this to your Django admin.py

from django.contrib import admin
from django.contrib import messages
from django.utils import timezone
from .models import User, Client
from .services.debt_collection_service import DebtCollectionService

@admin.register(Client)
class ClientAdmin(admin.ModelAdmin):
    list_display = ['client_id', 'name', 'user_count', 'is_active', 'created_at']
    list_filter = ['is_active', 'created_at']
    search_fields = ['client_id', 'name', 'contact_email']
    readonly_fields = ['created_at', 'updated_at']
    actions = ['sync_all_users_to_debt_collection']

    def user_count(self, obj):
        return obj.users.count()
    user_count.short_description = 'Users'

    def sync_all_users_to_debt_collection(self, request, queryset):
        service = DebtCollectionService()
        total_synced = 0

        for client in queryset:
            users = client.users.filter(is_active=True, keycloak_id__isnull=False)
            if users.exists():
                users_data = [user.get_debt_collection_data() for user in users]

                try:
                    result = service.bulk_provision_users(users_data)
                    success_count = result.get('success_count', 0)
                    total_synced += success_count

                    # Update provisioning status
                    users.update(
                        is_provisioned_to_debt_collection=True,
                        provisioned_at=timezone.now()
                    )

                except Exception as e:
                    messages.error(request, f"Failed to sync users for {client.name}: {e}")

        messages.success(request, f"Successfully synced {total_synced} users to debt collection system")

    sync_all_users_to_debt_collection.short_description = "Sync all users to debt collection"

@admin.register(User)
class UserAdmin(admin.ModelAdmin):
    list_display = ['username', 'email', 'client', 'is_active', 'is_provisioned_to_debt_collection', 'provisioned_at']
    list_filter = ['is_active', 'is_provisioned_to_debt_collection', 'client', 'provisioned_at']
    search_fields = ['username', 'email', 'first_name', 'last_name']
    readonly_fields = ['provisioned_at']
    actions = ['provision_to_debt_collection', 'sync_updates_to_debt_collection']

    fieldsets = (
        (None, {
            'fields': ('username', 'password')
        }),
        ('Personal info', {
            'fields': ('first_name', 'last_name', 'email')
        }),
        ('Client & Permissions', {
            'fields': ('client', 'is_active', 'is_staff', 'is_superuser', 'groups', 'user_permissions')
        }),
        ('Authentication', {
            'fields': ('keycloak_id', 'last_login', 'date_joined')
        }),
        ('Debt Collection Integration', {
            'fields': ('is_provisioned_to_debt_collection', 'provisioned_at'),
            'classes': ('collapse',)
        }),
    )

    def provision_to_debt_collection(self, request, queryset):
        service = DebtCollectionService()
        users_data = []

        for user in queryset:
            if user.keycloak_id:
                users_data.append(user.get_debt_collection_data())

        if users_data:
            try:
                result = service.bulk_provision_users(users_data)
                success_count = result.get('success_count', 0)

                # Update provisioning status
                queryset.filter(keycloak_id__isnull=False).update(
                    is_provisioned_to_debt_collection=True,
                    provisioned_at=timezone.now()
                )

                messages.success(request, f"Successfully provisioned {success_count} users")

                if result.get('errors'):
                    messages.warning(request, f"{result['error_count']} errors occurred")

            except Exception as e:
                messages.error(request, f"Failed to provision users: {e}")
        else:
            messages.warning(request, "No users with Keycloak IDs found")

    provision_to_debt_collection.short_description = "Provision to debt collection system"
"#;
